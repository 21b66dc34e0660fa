use rand::Rng;

/// Upper bound (exclusive) of generated seeds.
pub const MAX_SEED: i64 = 10_000_000;

pub fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(0..MAX_SEED)
}

pub fn resolve_seed<R: Rng + ?Sized>(seed: Option<i64>, rng: &mut R) -> i64 {
    match seed {
        Some(seed) => seed,
        None => random_seed(rng),
    }
}
