// State module
//
// Holds the responsive slide count. The resolver is the single owner of the
// value; everything else reads it through a watch receiver.

pub mod slide_count;

pub use slide_count::{SlideCountChange, SlideCountResolver};
