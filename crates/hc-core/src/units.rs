// hc-core/src/units.rs
//
// Pipe geometry enters as typed lengths so callers can build it in whatever
// unit they hold; the Hazen-Williams coefficient reads it back in feet and
// inches. Flows and head losses stay plain `Real` in the solver (cfs / ft).

use uom::si::f64::Length as UomLength;

pub type Length = UomLength;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn in_feet(l: Length) -> f64 {
    l.get::<uom::si::length::foot>()
}

#[inline]
pub fn in_inches(l: Length) -> f64 {
    l.get::<uom::si::length::inch>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert!((in_feet(ft(1500.0)) - 1500.0).abs() < 1e-9);
        assert!((in_inches(inch(8.0)) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn foot_is_twelve_inches() {
        assert!((in_inches(ft(1.0)) - 12.0).abs() < 1e-9);
        assert!((in_feet(m(0.3048)) - 1.0).abs() < 1e-9);
    }
}
