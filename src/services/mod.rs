pub mod accounts;
pub mod gazetteer;
pub mod locator;
pub mod search;
