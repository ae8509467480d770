// world/ - Scene geometry
//
// Pure geometry: viewport and title layout, organic bar edges, and the
// droplet silhouette. No simulation state lives here.

mod edge;
mod layout;
mod shape;

pub use edge::*;
pub use layout::*;
pub use shape::*;
