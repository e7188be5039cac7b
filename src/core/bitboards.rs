//! Bitboards
pub type Bitboard = u128;

pub trait BitboardOps {
    fn new() -> Self;

    /// Mask with the lowest `n` bits set
    fn first_n(n: u32) -> Self;

    fn get(&self, idx: u32) -> bool;
    fn set(&mut self, idx: u32, value: bool);
    fn pop(&mut self) -> Option<u32>;
    fn count(&self) -> u32;
    fn to_indices(self) -> Vec<u32>;
}

impl BitboardOps for Bitboard {

    fn new() -> Self { 0 }

    fn first_n(n: u32) -> Self {
        if n >= Bitboard::BITS { Bitboard::MAX } else { (1 << n) - 1 }
    }

    fn get(&self, idx: u32) -> bool {
        self & (1 << idx) != 0
    }

    fn set(&mut self, idx: u32, value: bool) {
        if value {
            *self |= 1 << idx;
        } else {
            *self &= !(1 << idx);
        }
    }

    fn pop(&mut self) -> Option<u32> {
        if *self == 0 { return None; }
        let idx = self.trailing_zeros();
        *self &= *self - 1; // Clear the lowest set bit
        Some(idx)
    }

    fn count(&self) -> u32 {
        self.count_ones()
    }

    fn to_indices(self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.count() as usize);
        let mut bb = self;
        while let Some(idx) = bb.pop() {
            indices.push(idx);
        }
        indices
    }
}
