mod transform;

pub use transform::{ProjTransformer, Projector};
