pub mod repository;
pub mod service;

pub use repository::TaskRepository;
pub use service::TasksService;
