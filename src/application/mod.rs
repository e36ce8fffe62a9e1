pub mod ai;
pub mod assistant;
pub mod navigation;
pub mod normalize;
pub mod preferences;
pub mod prompt;
pub mod session;
pub mod speech;
pub mod translate;
