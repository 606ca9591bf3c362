// Numeric parsers
pub mod salary;
pub mod upload;

// Categorical mappers
pub mod category;
pub mod degree;
pub mod enthusiast;
pub mod experience;
pub mod location;
pub mod position;
pub mod work_type;

// Re-export the main components
pub use category::{normalize_category, EmploymentCategory};
pub use degree::{clean_degree, DegreeLevel};
pub use enthusiast::clean_enthusiast;
pub use experience::{clean_experience, Experience};
pub use location::{clean_location, Province};
pub use position::{map_position, PositionFamily};
pub use salary::{clean_salary, normalize_salary, WorkSchedule};
pub use upload::clean_upload;
pub use work_type::{clean_type, WorkArrangement};
