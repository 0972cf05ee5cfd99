pub mod dataset;
pub mod groups;
pub mod loader;

pub use dataset::{AlgorithmMap, DataSet, DataSetList, FuncGroup, NoiseGroup, Trial};
pub use loader::{LoadedData, load_folders};
