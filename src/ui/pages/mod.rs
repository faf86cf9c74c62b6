pub mod add_edit_market;
pub mod markets;
pub mod sell_produce;
pub mod transactions;

pub use add_edit_market::{AddEditMarketPage, FormMode};
pub use markets::MarketsPage;
pub use sell_produce::SellProducePage;
pub use transactions::TransactionsPage;
