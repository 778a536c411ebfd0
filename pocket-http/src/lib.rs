mod factory;
mod repository;

pub use factory::HttpContactClientFactory;
pub use repository::HttpContactRepository;
