pub mod category;
pub mod combo;
pub mod loaders;
pub mod order;

pub use category::{is_packaging, Category};
pub use combo::{combinations_in_range, CategoryCombo};
pub use loaders::{load_orders, read_orders, Dataset};
pub use order::{Order, OrderLine, Partition};
