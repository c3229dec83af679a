use rand::Rng;

// A set of names to choose from.
const NAMES: [&str; 4] = ["John", "Peter", "Jack", "Steve"];
// A set of surnames to choose from.
const SURNAMES: [&str; 4] = ["Johnson", "Peterson", "Jackson", "Steveson"];

/// Random registration plate of the form `ABC 123`.
pub fn random_car_number<R: Rng>(rng: &mut R) -> String {
    let letters: String = (0..3)
        .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
        .collect();
    let digits: String = (0..3)
        .map(|_| char::from(rng.random_range(b'0'..=b'9')))
        .collect();
    format!("{} {}", letters, digits)
}

/// Random "Name Surname" drawn from the fixed lists.
pub fn random_driver_name<R: Rng>(rng: &mut R) -> String {
    let name = NAMES[rng.random_range(0..NAMES.len())];
    let surname = SURNAMES[rng.random_range(0..SURNAMES.len())];
    format!("{} {}", name, surname)
}
