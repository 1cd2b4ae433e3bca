pub mod modular;
pub mod primes;
pub mod primitive_root;

pub use modular::mod_pow;
pub use primes::{is_prime_fast, is_prime_with, PrimalityMode, PrimeGenerator};
pub use primitive_root::{is_primitive_root, PrimitiveRootFinder, RootSearchPolicy, SEARCH_WINDOW};
