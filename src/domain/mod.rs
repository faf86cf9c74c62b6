//! Market and sale logic behind the screens lives here.

pub mod app_state;
pub mod cart;
pub mod entities;
pub mod market_form;
pub mod sell_session;
pub mod submit;

#[allow(unused_imports)]
pub use app_state::AppState;
#[allow(unused_imports)]
pub use cart::{CartLine, CountChange, ProduceCart, QuotaProgress, NO_QUOTA_LABEL};
#[allow(unused_imports)]
pub use entities::{Market, MarketId, MarketListing, ProduceOffering, Quota, SaleRecord};
#[allow(unused_imports)]
pub use market_form::{MarketForm, MarketFormError, ProduceRow, SaveMarketError};
#[allow(unused_imports)]
pub use sell_session::{SaleSubmission, SellSession, SubmitError};
#[allow(unused_imports)]
pub use submit::{SubmitGate, SubmitStatus};
