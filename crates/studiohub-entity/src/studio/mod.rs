//! Studio catalog entities referenced by class sessions.

pub mod location;
pub mod program_type;
pub mod trainer;

pub use location::Location;
pub use program_type::ProgramType;
pub use trainer::Trainer;
