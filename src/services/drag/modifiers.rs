// Drag modifiers
// Pure constraint functions applied to the raw drag delta

use super::geometry::{Rect, Transform};

/// Input handed to a modifier on every transform computation
pub struct ModifierInput<'a> {
    /// Bounding rect of the dragged element, captured at pointer-down
    pub dragging_rect: Option<Rect>,
    /// The unconstrained delta
    pub transform: Transform,
    /// Id of the dragged element
    pub id: &'a str,
}

/// A pure constraint on the drag delta. Must be side-effect free; the engine
/// may call it any number of times per interaction.
pub type Modifier = Box<dyn Fn(&ModifierInput) -> Transform>;

/// The default modifier: passes the delta through unchanged
pub fn identity() -> Modifier {
    Box::new(|input| input.transform)
}

/// Clamp the delta so the dragged rectangle cannot leave `bounds`.
///
/// The bounds are queried live on each call, so a container that moves or
/// resizes mid-drag keeps constraining correctly. Without a dragging rect or
/// measurable bounds the delta passes through unchanged.
pub fn restrict_to_rect(bounds: impl Fn() -> Option<Rect> + 'static) -> Modifier {
    Box::new(move |input| {
        let (Some(rect), Some(bounds)) = (input.dragging_rect, bounds()) else {
            return input.transform;
        };
        let min_x = bounds.left() - rect.left();
        let max_x = bounds.right() - rect.right();
        let min_y = bounds.top() - rect.top();
        let max_y = bounds.bottom() - rect.bottom();
        Transform::new(
            input.transform.x.clamp(min_x, min_x.max(max_x)),
            input.transform.y.clamp(min_y, min_y.max(max_y)),
        )
    })
}

/// Chain modifiers left to right; each sees the previous one's output
pub fn compose(modifiers: Vec<Modifier>) -> Modifier {
    Box::new(move |input| {
        modifiers.iter().fold(input.transform, |transform, modifier| {
            modifier(&ModifierInput {
                dragging_rect: input.dragging_rect,
                transform,
                id: input.id,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rect: Option<Rect>, transform: Transform) -> ModifierInput<'static> {
        ModifierInput {
            dragging_rect: rect,
            transform,
            id: "1",
        }
    }

    #[test]
    fn test_identity() {
        let modifier = identity();
        let transform = Transform::new(12.0, -3.0);
        assert_eq!(modifier(&input(None, transform)), transform);
    }

    #[test]
    fn test_restrict_clamps_each_axis() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let modifier = restrict_to_rect(move || Some(bounds));

        // free movement inside the bounds
        assert_eq!(
            modifier(&input(Some(rect), Transform::new(50.0, 50.0))),
            Transform::new(50.0, 50.0)
        );
        // pushed past the right/bottom edge
        assert_eq!(
            modifier(&input(Some(rect), Transform::new(900.0, 900.0))),
            Transform::new(500.0, 400.0)
        );
        // pushed past the left/top edge
        assert_eq!(
            modifier(&input(Some(rect), Transform::new(-900.0, -900.0))),
            Transform::new(-100.0, -100.0)
        );
    }

    #[test]
    fn test_restrict_without_rect_passes_through() {
        let modifier = restrict_to_rect(|| Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let transform = Transform::new(999.0, 999.0);
        assert_eq!(modifier(&input(None, transform)), transform);
    }

    #[test]
    fn test_compose_applies_in_order() {
        let halve: Modifier = Box::new(|i| Transform::new(i.transform.x / 2.0, i.transform.y / 2.0));
        let cap: Modifier = Box::new(|i| Transform::new(i.transform.x.min(10.0), i.transform.y.min(10.0)));
        let modifier = compose(vec![halve, cap]);
        assert_eq!(
            modifier(&input(None, Transform::new(100.0, 8.0))),
            Transform::new(10.0, 4.0)
        );
    }
}
