pub mod account;

pub use account::AccountRepository;
pub use account::MockAccountRepository;
