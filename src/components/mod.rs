//! UI Components

pub mod features;
pub mod hero;
pub mod navbar;
pub mod toast;

pub use features::FeaturesSection;
pub use hero::HeroSection;
pub use navbar::Navbar;
pub use toast::Toast;
