use explorer_query::Namespace;

/// Index families. Currency documents live in separate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    Snapshots,
    Blocks,
    Transactions,
    FeeTransactions,
    Balances,
    Metagraphs,
}

impl Index {
    pub fn name(self, ns: &Namespace) -> &'static str {
        match (self, ns.is_currency()) {
            (Index::Snapshots, false) => "snapshots",
            (Index::Snapshots, true) => "currency-snapshots",
            (Index::Blocks, false) => "blocks",
            (Index::Blocks, true) => "currency-blocks",
            (Index::Transactions, false) => "transactions",
            (Index::Transactions, true) => "currency-transactions",
            (Index::FeeTransactions, _) => "currency-fee-transactions",
            (Index::Balances, false) => "balances",
            (Index::Balances, true) => "currency-balances",
            (Index::Metagraphs, _) => "metagraphs",
        }
    }
}
