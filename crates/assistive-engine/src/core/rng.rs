//! Record id generator. Ids only need to be unique within one device, so a
//! seedable xorshift64 stream is enough.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// A zero seed would lock xorshift at zero forever; it is remapped.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn step(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// 16 lowercase hex digits.
    pub fn next_id(&mut self) -> String {
        format!("{:016x}", self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_ids() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_id(), b.next_id());
        }
        assert_ne!(Rng::new(43).next_id(), Rng::new(42).next_id());
    }

    #[test]
    fn zero_seed_still_varies() {
        let mut rng = Rng::new(0);
        let first = rng.next_id();
        assert_ne!(first, "0000000000000000");
        assert_ne!(rng.next_id(), first);
    }

    #[test]
    fn ids_do_not_repeat_quickly() {
        let mut rng = Rng::new(7);
        let ids: std::collections::HashSet<String> = (0..100).map(|_| rng.next_id()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.len() == 16));
    }
}
