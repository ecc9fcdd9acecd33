pub mod catch;
pub mod damage;
pub mod effectiveness;
pub mod stats;
pub mod turn_order;

pub use damage::{DamageKind, DamageResolver, DamageResult};
pub use effectiveness::{effectiveness_message, effectiveness_of, EffectivenessTier};
pub use turn_order::{order, resolve_exchange, ExchangeAction, ExchangeReport, Side};

#[cfg(test)]
mod tests;
