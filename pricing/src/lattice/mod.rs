mod binomial;

pub use binomial::BinomialTree;
