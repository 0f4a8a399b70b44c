mod db;
mod ledger;
mod report;
mod symbols;
mod tax;
mod yahoo;
