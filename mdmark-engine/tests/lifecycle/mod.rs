mod export;
mod extract;
mod highlight;
mod remove;
