pub mod io;
pub mod nd;
pub mod region;
pub mod traits;

pub use self::nd::NdImage;
pub use self::region::Region;
pub use self::traits::NdImageView;
