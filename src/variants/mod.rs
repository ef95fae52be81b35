mod lloyd;

pub(crate) use lloyd::Lloyd;
pub use lloyd::{sum_squared_error, update_centroids};
