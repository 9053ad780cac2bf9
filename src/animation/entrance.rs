use crate::animation::timeline::{AnimationStep, Delay};
use crate::ui::handles::{CarouselHandles, ElementHandle};
use std::time::Duration;

const DROP_IN_DURATION: Duration = Duration::from_millis(200);
const DROP_IN_STAGGER: Duration = Duration::from_millis(100);
const DROP_IN_OFFSET: f64 = -50.0;
const LOGO_AT: Duration = Duration::from_millis(600);

/// First-paint timeline played right after the initial mount.
///
/// Slides drop in one after another, the logo fades in at 600ms (overlapping
/// the tail of the slides on wide feeds), then the arrows drop in and the
/// repository link fades in last.
pub fn entrance_timeline(handles: &CarouselHandles, arrows: &[ElementHandle]) -> Vec<AnimationStep> {
    vec![
        drop_in(handles.slides.clone()),
        AnimationStep::new(vec![handles.logo])
            .keyframe("opacity", 0.0, 1.0)
            .at(LOGO_AT),
        drop_in(arrows.to_vec()),
        AnimationStep::new(vec![handles.repository_link]).keyframe("opacity", 0.0, 1.0),
    ]
}

fn drop_in(targets: Vec<ElementHandle>) -> AnimationStep {
    AnimationStep::new(targets)
        .keyframe("opacity", 0.0, 1.0)
        .keyframe("y", DROP_IN_OFFSET, 0.0)
        .duration(DROP_IN_DURATION)
        .delay(Delay::Stagger(DROP_IN_STAGGER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::timeline::{DEFAULT_STEP_DURATION, TimelinePlan};
    use crate::ui::handles::{ArrowDirection, ElementIds, ElementRole};

    fn handles(ids: &ElementIds, slides: usize) -> CarouselHandles {
        CarouselHandles {
            container: Some(ids.allocate(ElementRole::Container)),
            slides: (0..slides).map(|i| ids.allocate(ElementRole::Slide(i))).collect(),
            logo: ids.allocate(ElementRole::Logo),
            repository_link: ids.allocate(ElementRole::RepositoryLink),
        }
    }

    #[test]
    fn test_entrance_layout() {
        let ids = ElementIds::new();
        let handles = handles(&ids, 3);
        let arrows = vec![
            ids.allocate(ElementRole::Arrow(ArrowDirection::Prev)),
            ids.allocate(ElementRole::Arrow(ArrowDirection::Next)),
        ];

        let plan = TimelinePlan::resolve(&entrance_timeline(&handles, &arrows));
        let start_of = |role: ElementRole| {
            plan.tweens
                .iter()
                .find(|t| t.target.role == role)
                .map(|t| t.start)
                .unwrap()
        };

        assert_eq!(start_of(ElementRole::Slide(2)), Duration::from_millis(200));
        assert_eq!(start_of(ElementRole::Logo), LOGO_AT);
        // Arrows follow the logo, which ends at 600 + 300ms
        assert_eq!(
            start_of(ElementRole::Arrow(ArrowDirection::Prev)),
            LOGO_AT + DEFAULT_STEP_DURATION
        );
        assert_eq!(
            start_of(ElementRole::Arrow(ArrowDirection::Next)),
            Duration::from_millis(1000)
        );
        assert_eq!(start_of(ElementRole::RepositoryLink), Duration::from_millis(1200));
    }

    #[test]
    fn test_entrance_without_slides() {
        let ids = ElementIds::new();
        let handles = handles(&ids, 0);

        let plan = TimelinePlan::resolve(&entrance_timeline(&handles, &[]));

        // Logo and repository link still fade in
        assert_eq!(plan.tweens.len(), 2);
    }
}
