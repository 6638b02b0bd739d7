//! Boolean combination of two sorted crossing lists.
//!
//! Both operands report every crossing of the full line, so a walk that
//! starts outside both solids sees each membership change in order. An event
//! survives when it changes the combined membership; it is then relabelled
//! with the crossing that change implies, and its normal is turned around
//! when the relabelling disagrees with the event's own direction (the inside
//! of a subtracted solid becomes the outside of the result).

use super::{Crossing, Intersection};

pub(crate) fn combine<'a>(
    a: Vec<Intersection<'a>>,
    b: Vec<Intersection<'a>>,
    rule: impl Fn(bool, bool) -> bool,
) -> Vec<Intersection<'a>> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut in_a, mut in_b) = (false, false);
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();

    loop {
        let take_a = match (a.peek(), b.peek()) {
            // on a tie entries go first, so touching solids leave no gap
            (Some(x), Some(y)) if x.t == y.t => {
                x.crossing == Crossing::Entry || y.crossing == Crossing::Exit
            }
            (Some(x), Some(y)) => x.t < y.t,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let mut event = match if take_a { a.next() } else { b.next() } {
            Some(e) => e,
            None => break,
        };

        let before = rule(in_a, in_b);
        let entering = event.crossing == Crossing::Entry;
        if take_a { in_a = entering } else { in_b = entering }
        let after = rule(in_a, in_b);

        if before != after {
            let crossing = Crossing::from_inside(after);
            if crossing != event.crossing {
                event.normal = -event.normal;
                event.crossing = crossing;
            }
            out.push(event);
        }
    }
    out
}
