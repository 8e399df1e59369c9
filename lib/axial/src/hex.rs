use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// order matters: ring walks start at DIRECTIONS[4] and then step through 0..6
pub const DIRECTIONS: [Hex; 6] = [
        Hex { q: 1, r: -1 },  // north-east
        Hex { q: 0, r: -1 },  // north-west
        Hex { q: -1, r: 0 },  // west
        Hex { q: -1, r: 1 },  // south-west
        Hex { q: 0, r: 1 },   // south-east
        Hex { q: 1, r: 0 },   // east
];

/// Axial hex coordinate. Equality, hashing and ordering only ever look at `q` and `r`;
/// the cube component and the offset form are derived on demand.
///
/// Integer arithmetic wraps at the `i32` limits rather than panicking, and
/// [`Hex::distance`] saturates at `i32::MAX`. Worlds stay far inside that range.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

/// Rectangular "odd-r" coordinate used for dense rasters and tilemap painting.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Hex {
    pub const ZERO: Hex = Hex { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Hex { q, r }
    }

    /// Third cube component, `q + r + s == 0`.
    pub const fn s(&self) -> i32 {
        self.q.wrapping_add(self.r).wrapping_neg()
    }

    pub const fn to_offset(&self) -> Offset {
        Offset { x: self.q.wrapping_add((self.r - (self.r & 1)) / 2), y: self.r }
    }

    pub const fn from_offset(offset: Offset) -> Self {
        Hex { q: offset.x.wrapping_sub((offset.y - (offset.y & 1)) / 2), r: offset.y }
    }

    pub fn distance(&self, other: &Hex) -> i32 {
        let dq = self.q as i64 - other.q as i64;
        let dr = self.r as i64 - other.r as i64;
        let distance = (dq.abs() + dr.abs() + (dq + dr).abs()) / 2;
        i32::try_from(distance).unwrap_or(i32::MAX)
    }

    pub fn neighbors(&self) -> [Hex; 6] {
        DIRECTIONS.map(|dir| *self + dir)
    }

    /// Hexes at exactly `radius` steps, starting south-east of the centre and walking
    /// each direction in turn. `radius == 0` yields the centre alone.
    pub fn ring(&self, radius: u32) -> Vec<Hex> {
        if radius == 0 { return vec![*self]; }

        let mut ring = Vec::with_capacity(6 * radius as usize);
        let mut hex = *self + DIRECTIONS[4] * radius as i32;
        for dir in DIRECTIONS {
            for _ in 0..radius {
                ring.push(hex);
                hex += dir;
            }
        }
        ring
    }

    /// Centre followed by every ring out to `radius`, inside out.
    pub fn spiral(&self, radius: u32) -> Vec<Hex> {
        let mut spiral = Vec::with_capacity(1 + 3 * radius as usize * (radius as usize + 1));
        spiral.push(*self);
        for i in 1..=radius { spiral.extend(self.ring(i)); }
        spiral
    }
}

impl From<Offset> for Hex {
    fn from(offset: Offset) -> Self {
        Hex::from_offset(offset)
    }
}

impl From<Hex> for Offset {
    fn from(hex: Hex) -> Self {
        hex.to_offset()
    }
}

impl Add<Hex> for Hex {
    type Output = Hex;
    fn add(self, rhs: Hex) -> Self::Output {
        Hex { q: self.q.wrapping_add(rhs.q), r: self.r.wrapping_add(rhs.r) }
    }
}

impl AddAssign<Hex> for Hex {
    fn add_assign(&mut self, rhs: Hex) {
        *self = *self + rhs;
    }
}

impl Sub<Hex> for Hex {
    type Output = Hex;
    fn sub(self, rhs: Hex) -> Self::Output {
        Hex { q: self.q.wrapping_sub(rhs.q), r: self.r.wrapping_sub(rhs.r) }
    }
}

impl Neg for Hex {
    type Output = Hex;
    fn neg(self) -> Self::Output {
        Hex { q: self.q.wrapping_neg(), r: self.r.wrapping_neg() }
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;
    fn mul(self, rhs: i32) -> Self::Output {
        Hex { q: self.q.wrapping_mul(rhs), r: self.r.wrapping_mul(rhs) }
    }
}

impl Mul<f32> for Hex {
    type Output = Hex;
    fn mul(self, rhs: f32) -> Self::Output {
        round(self.q as f64 * rhs as f64, self.r as f64 * rhs as f64)
    }
}

impl Div<i32> for Hex {
    type Output = Hex;
    fn div(self, rhs: i32) -> Self::Output {
        assert!(rhs != 0, "hex divided by zero");
        round(self.q as f64 / rhs as f64, self.r as f64 / rhs as f64)
    }
}

impl Div<f32> for Hex {
    type Output = Hex;
    fn div(self, rhs: f32) -> Self::Output {
        assert!(rhs != 0., "hex divided by zero");
        round(self.q as f64 / rhs as f64, self.r as f64 / rhs as f64)
    }
}

/// Rounds fractional axial coordinates to the nearest hex, fixing up whichever cube
/// component drifted furthest so that `q + r + s` stays zero.
pub fn round(q0: f64, r0: f64) -> Hex {
    let s0 = -q0-r0;
    let mut q = q0.round();
    let mut r = r0.round();
    let s = s0.round();

    let q_diff = (q - q0).abs();
    let r_diff = (r - r0).abs();
    let s_diff = (s - s0).abs();

    if q_diff > r_diff && q_diff > s_diff {
        q = -r-s;
    } else if r_diff > s_diff {
        r = -q-s;
    }

    Hex { q: q as i32, r: r as i32 }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sample() -> Vec<Hex> {
        let mut hexes = Vec::new();
        for q in -7..=7 {
            for r in -7..=7 { hexes.push(Hex::new(q, r)); }
        }
        hexes
    }

    // ===== OFFSET CONVERSION TESTS =====

    #[test]
    fn test_offset_roundtrip() {
        for q in -50..=50 {
            for r in -50..=50 {
                let hex = Hex::new(q, r);
                assert_eq!(Hex::from_offset(hex.to_offset()), hex, "Roundtrip failed for {:?}", hex);
            }
        }
    }

    #[test]
    fn test_offset_roundtrip_from_rect() {
        for x in -20..=20 {
            for y in -20..=20 {
                let offset = Offset { x, y };
                assert_eq!(Hex::from(offset).to_offset(), offset);
            }
        }
    }

    #[test]
    fn test_offset_odd_rows_shift() {
        // even rows line up with q, odd rows are pushed half a cell right
        assert_eq!(Hex::new(0, 0).to_offset(), Offset { x: 0, y: 0 });
        assert_eq!(Hex::new(0, 1).to_offset(), Offset { x: 0, y: 1 });
        assert_eq!(Hex::new(-1, 2).to_offset(), Offset { x: 0, y: 2 });
        assert_eq!(Hex::new(-1, 3).to_offset(), Offset { x: 0, y: 3 });
        assert_eq!(Hex::new(0, -1).to_offset(), Offset { x: -1, y: -1 });
    }

    #[test]
    fn test_cube_component_sums_to_zero() {
        for hex in sample() {
            assert_eq!(hex.q + hex.r + hex.s(), 0);
        }
    }

    #[test]
    fn test_offset_roundtrip_at_limits() {
        for hex in [Hex::new(i32::MAX, i32::MAX), Hex::new(i32::MIN, i32::MIN), Hex::new(i32::MAX, i32::MIN + 1), Hex::new(i32::MIN, 7)] {
            assert_eq!(Hex::from_offset(hex.to_offset()), hex, "Roundtrip failed for {:?}", hex);
        }
    }

    // ===== DISTANCE TESTS =====

    #[test]
    fn test_distance_at_limits() {
        let far = Hex::new(i32::MAX, 0);
        let near = Hex::new(i32::MIN, 0);
        assert_eq!(far.distance(&near), i32::MAX, "Distance saturates instead of overflowing");
        assert_eq!(near.distance(&far), i32::MAX);
        assert_eq!(Hex::new(i32::MAX, i32::MIN).distance(&Hex::new(i32::MAX - 1, i32::MIN)), 1);
    }

    #[test]
    fn test_distance_identity_and_symmetry() {
        let hexes = sample();
        for a in &hexes {
            assert_eq!(a.distance(a), 0);
            for b in &hexes {
                assert_eq!(a.distance(b), b.distance(a));
                if a != b { assert!(a.distance(b) > 0, "{:?} and {:?} should be apart", a, b); }
            }
        }
    }

    #[test]
    fn test_distance_triangle_inequality() {
        let hexes: Vec<Hex> = sample().into_iter().step_by(7).collect();
        for a in &hexes {
            for b in &hexes {
                for c in &hexes {
                    assert!(a.distance(c) <= a.distance(b) + b.distance(c),
                        "Triangle inequality broken for {:?} {:?} {:?}", a, b, c);
                }
            }
        }
    }

    #[test]
    fn test_distance_known_values() {
        assert_eq!(Hex::new(0, 0).distance(&Hex::new(4, 0)), 4);
        assert_eq!(Hex::new(0, 0).distance(&Hex::new(2, -2)), 2);
        assert_eq!(Hex::new(0, 0).distance(&Hex::new(2, 2)), 4);
        assert_eq!(Hex::new(-3, 1).distance(&Hex::new(1, -2)), 4);
    }

    // ===== NEIGHBOR / RING / SPIRAL TESTS =====

    #[test]
    fn test_neighbors_are_adjacent_and_ordered() {
        let center = Hex::new(3, -2);
        let neighbors = center.neighbors();
        for (i, neighbor) in neighbors.iter().enumerate() {
            assert_eq!(center.distance(neighbor), 1);
            assert_eq!(*neighbor - center, DIRECTIONS[i]);
        }
    }

    #[test]
    fn test_ring_zero_is_center() {
        let center = Hex::new(5, 5);
        assert_eq!(center.ring(0), vec![center]);
    }

    #[test]
    fn test_ring_one_is_neighbors() {
        let ring: HashSet<Hex> = Hex::ZERO.ring(1).into_iter().collect();
        let neighbors: HashSet<Hex> = Hex::ZERO.neighbors().into_iter().collect();
        assert_eq!(ring.len(), 6);
        assert_eq!(ring, neighbors);
        assert!(ring.iter().all(|hex| hex.distance(&Hex::ZERO) == 1));
    }

    #[test]
    fn test_ring_starts_south_east() {
        let center = Hex::new(1, 1);
        assert_eq!(center.ring(3)[0], center + DIRECTIONS[4] * 3);
    }

    #[test]
    fn test_ring_cardinality_and_distance() {
        let center = Hex::new(-2, 4);
        for radius in 1..=8 {
            let ring = center.ring(radius);
            let unique: HashSet<Hex> = ring.iter().copied().collect();
            assert_eq!(ring.len(), 6 * radius as usize);
            assert_eq!(unique.len(), ring.len(), "Ring {} contains duplicates", radius);
            assert!(ring.iter().all(|hex| center.distance(hex) == radius as i32));
        }
    }

    #[test]
    fn test_ring_is_closed_walk() {
        let ring = Hex::ZERO.ring(4);
        for pair in ring.windows(2) {
            assert_eq!(pair[0].distance(&pair[1]), 1);
        }
        assert_eq!(ring[ring.len() - 1].distance(&ring[0]), 1, "Ring should close on itself");
    }

    #[test]
    fn test_spiral_completeness() {
        let center = Hex::new(7, -3);
        for radius in 0..=6u32 {
            let spiral = center.spiral(radius);
            let unique: HashSet<Hex> = spiral.iter().copied().collect();
            let expected = 1 + 3 * radius * (radius + 1);
            assert_eq!(spiral.len(), expected as usize);
            assert_eq!(unique.len(), spiral.len());
            assert!(spiral.iter().all(|hex| center.distance(hex) <= radius as i32));
        }
    }

    #[test]
    fn test_spiral_is_inside_out_and_restartable() {
        let spiral = Hex::ZERO.spiral(3);
        assert_eq!(spiral[0], Hex::ZERO);
        for pair in spiral.windows(2) {
            assert!(pair[0].distance(&Hex::ZERO) <= pair[1].distance(&Hex::ZERO));
        }
        assert_eq!(spiral, Hex::ZERO.spiral(3));
    }

    // ===== ARITHMETIC TESTS =====

    #[test]
    fn test_integer_arithmetic() {
        let a = Hex::new(2, -1);
        let b = Hex::new(-1, 3);
        assert_eq!(a + b, Hex::new(1, 2));
        assert_eq!(a - b, Hex::new(3, -4));
        assert_eq!(a * 3, Hex::new(6, -3));
        assert_eq!(-a, Hex::new(-2, 1));
        assert_eq!(Hex::new(6, -4) / 2, Hex::new(3, -2));
    }

    #[test]
    fn test_integer_arithmetic_wraps_at_limits() {
        let edge = Hex::new(i32::MAX, i32::MIN);
        assert_eq!(edge + Hex::new(1, -1), Hex::new(i32::MIN, i32::MAX));
        assert_eq!(edge - Hex::new(-1, 1), Hex::new(i32::MIN, i32::MAX));
        assert_eq!(-Hex::new(i32::MIN, 0), Hex::new(i32::MIN, 0));
        assert_eq!(edge * 2, Hex::new(-2, 0));
        assert_eq!(edge.s(), 1);
    }

    #[test]
    fn test_float_arithmetic_rounds_to_hex() {
        assert_eq!(Hex::new(4, 0) * 0.5, Hex::new(2, 0));
        assert_eq!(Hex::new(2, -2) * 1.5, Hex::new(3, -3));
        // halfway cases round away from zero, same as f64::round
        assert_eq!(Hex::new(3, 0) / 2.0_f32, Hex::new(2, 0));
        let scaled = Hex::new(3, -3) * (1. / 3.);
        assert_eq!(scaled, Hex::new(1, -1));
    }

    #[test]
    #[should_panic]
    fn test_divide_by_zero_panics() {
        let _ = Hex::new(1, 1) / 0;
    }

    #[test]
    fn test_round_keeps_cube_invariant() {
        let hex = round(0.4, 0.4);
        assert_eq!(hex.q + hex.r + hex.s(), 0);
        assert_eq!(round(1.1, -0.9), Hex::new(1, -1));
        assert_eq!(round(-0.2, 0.1), Hex::ZERO);
    }
}
