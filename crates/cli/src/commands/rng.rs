//! Print the first values a session seed produces, for replaying runs.

use shared::rng::Mulberry32;

pub fn run(seed: u32, count: usize) {
    for value in sequence(seed, count) {
        println!("{value:.6}");
    }
}

fn sequence(seed: u32, count: usize) -> Vec<f64> {
    let mut rng = Mulberry32::new(seed);
    (0..count).map(|_| rng.next_f64()).collect()
}
