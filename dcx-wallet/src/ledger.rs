use std::collections::HashMap;

use num_bigint::BigUint;

use dcx_api::{
    ConnectorError, ConnectorResult, DustBalance, HistoryEntry, TokenBalances, TokenKind,
    TokenType, TxStatus,
};

/// Flat Dust fee the reference wallet charges per balanced intent. Real
/// wallets price fees from transaction weight; a constant keeps fixtures
/// predictable.
pub const INTENT_FEE_DUST: u64 = 500;

/// The wallet's view of its own holdings and transaction history.
/// Everything lives in memory; snapshots handed out are clones.
pub struct LedgerState {
    shielded: TokenBalances,
    unshielded: TokenBalances,
    dust: DustBalance,
    /// Oldest first; pages are served newest first.
    history: Vec<HistoryEntry>,
}

impl LedgerState {
    pub fn new() -> LedgerState {
        LedgerState {
            shielded: HashMap::new(),
            unshielded: HashMap::new(),
            dust: DustBalance {
                balance: BigUint::default(),
                cap: BigUint::default(),
            },
            history: Vec::new(),
        }
    }

    fn balances_mut(&mut self, kind: TokenKind) -> &mut TokenBalances {
        match kind {
            TokenKind::Shielded => &mut self.shielded,
            TokenKind::Unshielded => &mut self.unshielded,
        }
    }

    pub fn shielded_balances(&self) -> TokenBalances {
        self.shielded.clone()
    }

    pub fn unshielded_balances(&self) -> TokenBalances {
        self.unshielded.clone()
    }

    pub fn dust_balance(&self) -> DustBalance {
        self.dust.clone()
    }

    pub fn set_dust(&mut self, balance: BigUint, cap: BigUint) {
        self.dust = DustBalance { balance, cap };
    }

    pub fn credit(&mut self, kind: TokenKind, token_type: &TokenType, value: &BigUint) {
        let balance = self
            .balances_mut(kind)
            .entry(token_type.clone())
            .or_default();
        *balance += value;
    }

    pub fn debit(
        &mut self,
        kind: TokenKind,
        token_type: &TokenType,
        value: &BigUint,
    ) -> ConnectorResult<()> {
        let balances = self.balances_mut(kind);
        let balance = balances
            .get_mut(token_type)
            .ok_or(ConnectorError::InsufficientFunds)?;
        if *balance < *value {
            return Err(ConnectorError::InsufficientFunds);
        }
        *balance -= value;
        // zero balances are omitted from snapshots
        if balance.bits() == 0 {
            balances.remove(token_type);
        }
        Ok(())
    }

    /// Check every draw and the fee against current balances first, then
    /// apply the lot as one step: a failed balancing never leaves a
    /// half-debited ledger behind.
    pub fn withdraw(
        &mut self,
        draws: &[(TokenKind, TokenType, BigUint)],
        fee: Option<&BigUint>,
    ) -> ConnectorResult<()> {
        let mut totals: HashMap<(TokenKind, &TokenType), BigUint> = HashMap::new();
        for (kind, token_type, value) in draws {
            *totals.entry((*kind, token_type)).or_default() += value;
        }

        for ((kind, token_type), total) in &totals {
            let balances = match kind {
                TokenKind::Shielded => &self.shielded,
                TokenKind::Unshielded => &self.unshielded,
            };
            let available = balances.get(*token_type).cloned().unwrap_or_default();
            if available < *total {
                return Err(ConnectorError::InsufficientFunds);
            }
        }
        if let Some(fee) = fee {
            if self.dust.balance < *fee {
                return Err(ConnectorError::InsufficientFunds);
            }
        }

        let totals: Vec<((TokenKind, TokenType), BigUint)> = totals
            .into_iter()
            .map(|((kind, token_type), total)| ((kind, token_type.clone()), total))
            .collect();
        for ((kind, token_type), total) in totals {
            self.debit(kind, &token_type, &total)
                .expect("withdraw checked availability");
        }
        if let Some(fee) = fee {
            self.dust.balance -= fee;
        }
        Ok(())
    }

    pub fn charge_dust_fee(&mut self, fee: &BigUint) -> ConnectorResult<()> {
        if self.dust.balance < *fee {
            return Err(ConnectorError::InsufficientFunds);
        }
        self.dust.balance -= fee;
        Ok(())
    }

    pub fn record_pending(&mut self, tx_hash: String) {
        self.history.push(HistoryEntry {
            tx_hash,
            tx_status: TxStatus::Pending,
        });
    }

    /// Move a known transaction to a new lifecycle state. Returns whether
    /// the hash was found.
    pub fn set_tx_status(&mut self, tx_hash: &str, tx_status: TxStatus) -> bool {
        match self.history.iter_mut().find(|x| x.tx_hash == tx_hash) {
            Some(entry) => {
                entry.tx_status = tx_status;
                true
            }
            None => false,
        }
    }

    /// Zero-indexed page, newest entries first, computed from the current
    /// snapshot. Pages past the end are empty, never an error.
    pub fn history_page(&self, page_number: u32, page_size: u32) -> Vec<HistoryEntry> {
        let start = (page_number as usize).saturating_mul(page_size as usize);
        self.history
            .iter()
            .rev()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
