use rand::seq::SliceRandom;
use rand::Rng;

pub const AI_NAMES: [&str; 14] = [
    "Athena", "Zeus", "Zagreus", "Hades", "Poseidon", "Magnus", "Hermes", "Percy", "Odin",
    "Erebus", "Dionysus", "Jesus", "Nyarlath", "Zenith",
];

/// 表示名 (例: `Odin(AI)`)
pub fn random_ai_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let base = AI_NAMES.choose(rng).copied().unwrap_or("Anon");
    format!("{}(AI)", base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_name_has_ai_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let name = random_ai_name(&mut rng);
            let base = name.strip_suffix("(AI)").expect("suffix");
            assert!(AI_NAMES.contains(&base));
        }
    }

    #[test]
    fn test_name_list() {
        assert_eq!(AI_NAMES.len(), 14);
        assert_eq!(AI_NAMES[0], "Athena");
        assert_eq!(AI_NAMES[11], "Jesus");
        assert_eq!(AI_NAMES[13], "Zenith");
    }
}
