mod polynomial;

pub use self::polynomial::Polynomial;
