pub mod add;
pub mod backup;
pub mod calculator;
pub mod del;
pub mod editor;
pub mod journal;
pub mod log;
pub mod observable;
pub mod search;
