mod fix;
mod location;
mod route;
mod session;
mod view;

pub use fix::{PositionError, PositionFix};
pub use location::{Coordinates, EARTH_RADIUS_KM};
pub use route::RoutePath;
pub use session::{NavigationSession, NavigationUpdate, Status};
pub use view::{format_distance, format_eta, format_speed, NavigationView, Notice, NoticeKind};
