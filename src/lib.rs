#![doc = "Dashboard of the Zurich municipal dog register"]
mod chart;
mod data;
mod fs;
mod shapes;
mod site;
mod types;

#[doc(inline)]
pub use chart::{ChoroplethMapbox, DistrictMap, FacetGrid, Gradient, InvalidInput, LineChart, Rgb};

#[doc(inline)]
pub use data::{CheckReport, Dataset, columns};

#[doc(inline)]
pub use shapes::{District, DistrictShapes};

#[doc(inline)]
pub use site::{Page, Site, build_site};

#[doc(inline)]
pub use types::{EventWindow, UnmatchedPolicy};
