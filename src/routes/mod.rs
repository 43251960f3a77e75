pub(crate) mod health;
pub(crate) mod stocks;
pub(crate) mod predictions;
