mod pbkdf2_hasher;

pub use pbkdf2_hasher::Pbkdf2PasswordHasher;
