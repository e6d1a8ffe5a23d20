//! Deterministic person-name generation using curated name lists.
//!
//! All generation is deterministic (same stream position = same names).
//! Each call consumes exactly one draw per name component.

use crate::rng::RandomSource;

/// Deterministic name generator using curated name lists
pub struct NameGenerator;

impl NameGenerator {
    /// Generate first name from curated list
    pub fn generate_first_name<R: RandomSource>(rng: &mut R) -> &'static str {
        *rng.pick(Self::first_names())
    }

    /// Generate last name from curated list
    pub fn generate_last_name<R: RandomSource>(rng: &mut R) -> &'static str {
        *rng.pick(Self::last_names())
    }

    /// `first.last@domain`, lowercased.
    pub fn full_email(first: &str, last: &str, domain: &str) -> String {
        format!("{}.{}@{}", first, last, domain).to_lowercase()
    }

    /// `first.l@domain`, lowercased. The shorter form people type into
    /// a quiz or signup box.
    pub fn short_email(first: &str, last: &str, domain: &str) -> String {
        let initial: String = last.chars().take(1).collect();
        format!("{}.{}@{}", first, initial, domain).to_lowercase()
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph",
            "Thomas", "Charles", "Christopher", "Daniel", "Matthew", "Anthony", "Mark",
            "Steven", "Paul", "Andrew", "Joshua", "Kevin", "Brian", "George", "Timothy",
            "Jason", "Ryan", "Jacob", "Nicholas", "Eric", "Jonathan", "Justin", "Brandon",
            "Samuel", "Gregory", "Patrick", "Tyler", "Aaron", "Nathan", "Henry", "Kyle",
            "Noah", "Ethan", "Dylan", "Jordan", "Gabriel", "Logan", "Mason", "Victor",
            "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Susan", "Jessica",
            "Sarah", "Karen", "Lisa", "Nancy", "Margaret", "Ashley", "Kimberly", "Emily",
            "Michelle", "Amanda", "Melissa", "Stephanie", "Rebecca", "Laura", "Amy",
            "Angela", "Anna", "Nicole", "Samantha", "Katherine", "Rachel", "Catherine",
            "Maria", "Heather", "Olivia", "Victoria", "Lauren", "Megan", "Hannah",
            "Madison", "Abigail", "Sophia", "Grace", "Aubrey", "Natalie", "Charlotte",
            "Isabella", "Ava", "Mia", "Ella", "Chloe", "Zoe",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
            "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
            "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson",
            "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen",
            "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera",
            "Campbell", "Mitchell", "Carter", "Roberts", "Phillips", "Evans", "Turner",
            "Parker", "Collins", "Edwards", "Stewart", "Morris", "Murphy", "Cook",
            "Rogers", "Morgan", "Cooper", "Peterson", "Reed", "Kelly", "Howard", "Kim",
            "Ward", "Watson", "Brooks", "Wood", "Bennett", "Gray", "Hughes", "Price",
            "Patel", "Chen", "Lang", "Foster", "Sullivan", "Bell", "Fisher", "Hayes",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GeneratorKind, RngBank, StreamSlot};

    #[test]
    fn name_generation_is_deterministic() {
        let bank = RngBank::new(GeneratorKind::Lcg, 12345, 67890);
        let mut rng1 = bank.for_stream(StreamSlot::Subscribers);
        let mut rng2 = bank.for_stream(StreamSlot::Subscribers);

        for _ in 0..20 {
            assert_eq!(
                NameGenerator::generate_first_name(&mut rng1),
                NameGenerator::generate_first_name(&mut rng2),
                "Same seed should produce same name"
            );
        }
    }

    #[test]
    fn emails_are_lowercased() {
        assert_eq!(
            NameGenerator::full_email("Aubrey", "Lang", "gmail.com"),
            "aubrey.lang@gmail.com"
        );
        assert_eq!(
            NameGenerator::short_email("John", "Davis", "gmail.com"),
            "john.d@gmail.com"
        );
    }
}
