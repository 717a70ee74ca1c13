mod common;

use num_bigint::BigUint;
use serial_test::serial;

use common::{connect_mainnet, counterparty_address, setup_wallet};
use dcx::api::{
    ConnectorError, DesiredInput, DesiredOutput, IntentId, MakeIntentOptions, SealedTransaction,
    TokenKind, TxStatus, UnsealedTransaction, WalletSession,
};
use dcx_common::FromHex;
use dcx_constants::sample::{NIGHT_TOKEN_TYPE, SAMPLE_SHIELDED_TOKEN_TYPE, TEST_SEED};
use dcx_wallet::{Intent, TxEnvelope, WalletKeys, INTENT_FEE_DUST};

fn night_output(value: u64) -> DesiredOutput {
    DesiredOutput {
        kind: TokenKind::Unshielded,
        token_type: NIGHT_TOKEN_TYPE.to_string(),
        value: BigUint::from(value),
        recipient: counterparty_address(TokenKind::Unshielded, "mainnet"),
    }
}

#[tokio::test]
#[serial]
async fn test_transfer_then_submit_round_trip() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    let tx = session.make_transfer(vec![night_output(100)]).await.unwrap();
    session.submit_transaction(tx).await.unwrap();

    let unshielded = session.get_unshielded_balances().await.unwrap();
    assert_eq!(
        unshielded.get(NIGHT_TOKEN_TYPE),
        Some(&BigUint::from(999_900u32))
    );
    let dust = session.get_dust_balance().await.unwrap();
    assert_eq!(dust.balance, BigUint::from(100_000 - INTENT_FEE_DUST));

    let page = session.get_tx_history(0, 1).await.unwrap();
    assert_eq!(page[0].tx_status, TxStatus::Pending);
}

#[tokio::test]
#[serial]
async fn test_transfer_validates_outputs() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    assert_eq!(
        session.make_transfer(vec![]).await.err(),
        Some(ConnectorError::InvalidTransaction)
    );

    // recipient kind mismatch
    let mut output = night_output(10);
    output.recipient = counterparty_address(TokenKind::Shielded, "mainnet");
    assert_eq!(
        session.make_transfer(vec![output]).await.err(),
        Some(ConnectorError::InvalidAddress)
    );

    // recipient from the wrong network
    let mut output = night_output(10);
    output.recipient = counterparty_address(TokenKind::Unshielded, "testnet");
    assert_eq!(
        session.make_transfer(vec![output]).await.err(),
        Some(ConnectorError::InvalidAddress)
    );
}

#[tokio::test]
#[serial]
async fn test_transfer_rejects_overspend_without_side_effects() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    assert_eq!(
        session.make_transfer(vec![night_output(2_000_000)]).await.err(),
        Some(ConnectorError::InsufficientFunds)
    );
    // the failed attempt must not have moved anything
    let unshielded = session.get_unshielded_balances().await.unwrap();
    assert_eq!(
        unshielded.get(NIGHT_TOKEN_TYPE),
        Some(&BigUint::from(1_000_000u32))
    );
    assert_eq!(
        session.get_dust_balance().await.unwrap().balance,
        BigUint::from(100_000u32)
    );
}

#[tokio::test]
#[serial]
async fn test_make_intent_segment_selection() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    let inputs = vec![DesiredInput {
        kind: TokenKind::Unshielded,
        token_type: NIGHT_TOKEN_TYPE.to_string(),
        value: BigUint::from(200u32),
    }];

    // segment 1 runs before any other intent after a merge
    let tx = session
        .make_intent(
            inputs.clone(),
            vec![],
            MakeIntentOptions {
                intent_id: IntentId::Explicit(1),
                pay_fees: true,
            },
        )
        .await
        .unwrap();
    let envelope = TxEnvelope::parse(&tx.raw).unwrap();
    assert_eq!(envelope.intents.len(), 1);
    assert_eq!(envelope.intents[0].segment_id, 1);
    assert!(envelope.intents[0].fees_paid);

    // 0 is the guaranteed section, not an intent slot
    let ret = session
        .make_intent(
            inputs.clone(),
            vec![],
            MakeIntentOptions {
                intent_id: IntentId::Explicit(0),
                pay_fees: true,
            },
        )
        .await;
    assert_eq!(ret.err(), Some(ConnectorError::InvalidTransaction));

    let tx = session
        .make_intent(
            inputs,
            vec![],
            MakeIntentOptions {
                intent_id: IntentId::Random,
                pay_fees: false,
            },
        )
        .await
        .unwrap();
    let envelope = TxEnvelope::parse(&tx.raw).unwrap();
    assert!(envelope.intents[0].segment_id >= 2);
    assert!(!envelope.intents[0].fees_paid);
}

#[tokio::test]
#[serial]
async fn test_make_intent_leaves_the_imbalance_in_place() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;
    let own_shielded = session
        .get_shielded_addresses()
        .await
        .unwrap()
        .shielded_address;

    // offer 200 Night, expect 100 of a shielded token back
    let tx = session
        .make_intent(
            vec![DesiredInput {
                kind: TokenKind::Unshielded,
                token_type: NIGHT_TOKEN_TYPE.to_string(),
                value: BigUint::from(200u32),
            }],
            vec![DesiredOutput {
                kind: TokenKind::Shielded,
                token_type: SAMPLE_SHIELDED_TOKEN_TYPE.to_string(),
                value: BigUint::from(100u32),
                recipient: own_shielded,
            }],
            MakeIntentOptions {
                intent_id: IntentId::Random,
                pay_fees: false,
            },
        )
        .await
        .unwrap();

    let envelope = TxEnvelope::parse(&tx.raw).unwrap();
    assert!(envelope.is_sealed());
    assert!(!envelope.is_balanced());

    // the offered side left the wallet when the intent was created
    let unshielded = session.get_unshielded_balances().await.unwrap();
    assert_eq!(
        unshielded.get(NIGHT_TOKEN_TYPE),
        Some(&BigUint::from(999_800u32))
    );
    // no fees taken when payFees is off
    assert_eq!(
        session.get_dust_balance().await.unwrap().balance,
        BigUint::from(100_000u32)
    );

    // an imbalanced transaction is not submittable
    assert_eq!(
        session.submit_transaction(tx).await.err(),
        Some(ConnectorError::InvalidTransaction)
    );
}

#[tokio::test]
#[serial]
async fn test_balance_unsealed_funds_and_seals() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    // a contract-interaction shape: a fallible intent the wallet must
    // balance before anything gets bound
    let mut intent = Intent::new(7, vec![], vec![night_output(500)], true);
    intent.attach_proof("mainnet").unwrap();
    let envelope = TxEnvelope::unsealed("mainnet", vec![intent]);
    let tx = UnsealedTransaction::new(envelope.to_raw().unwrap());

    let sealed = session.balance_unsealed_transaction(tx).await.unwrap();
    let balanced = TxEnvelope::parse(&sealed.raw).unwrap();
    assert!(balanced.is_sealed());
    assert!(balanced.is_balanced());
    assert!(!balanced.intents[0].inputs.is_empty());
    assert!(balanced.intents[0].fees_paid);

    let unshielded = session.get_unshielded_balances().await.unwrap();
    assert_eq!(
        unshielded.get(NIGHT_TOKEN_TYPE),
        Some(&BigUint::from(999_500u32))
    );

    session.submit_transaction(sealed).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_balance_unsealed_rejects_a_sealed_transaction() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    let sealed = session.make_transfer(vec![night_output(10)]).await.unwrap();
    let ret = session
        .balance_unsealed_transaction(UnsealedTransaction::new(sealed.raw))
        .await;
    assert_eq!(ret.err(), Some(ConnectorError::InvalidTransaction));
}

#[tokio::test]
#[serial]
async fn test_balance_sealed_appends_a_separate_intent() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;
    let own_shielded = session
        .get_shielded_addresses()
        .await
        .unwrap()
        .shielded_address;

    let tx = session
        .make_intent(
            vec![DesiredInput {
                kind: TokenKind::Unshielded,
                token_type: NIGHT_TOKEN_TYPE.to_string(),
                value: BigUint::from(200u32),
            }],
            vec![DesiredOutput {
                kind: TokenKind::Shielded,
                token_type: SAMPLE_SHIELDED_TOKEN_TYPE.to_string(),
                value: BigUint::from(100u32),
                recipient: own_shielded,
            }],
            MakeIntentOptions {
                intent_id: IntentId::Explicit(1),
                pay_fees: false,
            },
        )
        .await
        .unwrap();
    let original = TxEnvelope::parse(&tx.raw).unwrap();
    let original_binding = original.intents[0].binding_commitment.clone();

    let balanced_tx = session.balance_sealed_transaction(tx).await.unwrap();
    let balanced = TxEnvelope::parse(&balanced_tx.raw).unwrap();

    assert_eq!(balanced.intents.len(), 2);
    // the original intent's binding is byte-identical
    assert_eq!(balanced.intents[0], original.intents[0]);
    assert_eq!(balanced.intents[0].binding_commitment, original_binding);
    assert!(balanced.is_balanced());

    session.submit_transaction(balanced_tx).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_balance_sealed_rejects_imbalanced_fallible_sections() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    // a sealed transaction whose fallible intent is short of funds; the
    // wallet must refuse, pointing the caller at the unsealed path
    let keys = WalletKeys::from_seed(&Vec::from_hex(TEST_SEED).unwrap()).unwrap();
    let mut intent = Intent::new(3, vec![], vec![night_output(50)], true);
    intent.attach_proof("mainnet").unwrap();
    let mut envelope = TxEnvelope::unsealed("mainnet", vec![intent]);
    envelope.seal(&keys).unwrap();

    let ret = session
        .balance_sealed_transaction(SealedTransaction::new(envelope.to_raw().unwrap()))
        .await;
    assert_eq!(ret.err(), Some(ConnectorError::InvalidTransaction));
}

#[tokio::test]
#[serial]
async fn test_envelopes_are_network_scoped() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    let mut intent = Intent::new(
        5,
        vec![],
        vec![DesiredOutput {
            kind: TokenKind::Unshielded,
            token_type: NIGHT_TOKEN_TYPE.to_string(),
            value: BigUint::from(10u32),
            recipient: counterparty_address(TokenKind::Unshielded, "testnet"),
        }],
        false,
    );
    intent.attach_proof("testnet").unwrap();
    let envelope = TxEnvelope::unsealed("testnet", vec![intent]);

    let ret = session
        .balance_unsealed_transaction(UnsealedTransaction::new(envelope.to_raw().unwrap()))
        .await;
    assert_eq!(ret.err(), Some(ConnectorError::InvalidTransaction));
}

#[tokio::test]
#[serial]
async fn test_submit_rejects_forged_stage() {
    let wallet = setup_wallet();
    let session = connect_mainnet(&wallet).await;

    // an unsealed envelope smuggled in as a sealed transaction
    let mut intent = Intent::new(4, vec![], vec![night_output(10)], false);
    intent.attach_proof("mainnet").unwrap();
    let envelope = TxEnvelope::unsealed("mainnet", vec![intent]);

    let ret = session
        .submit_transaction(SealedTransaction::new(envelope.to_raw().unwrap()))
        .await;
    assert_eq!(ret.err(), Some(ConnectorError::InvalidTransaction));

    // garbage is rejected the same way, never a panic
    let ret = session
        .submit_transaction(SealedTransaction::new("definitely-not-hex"))
        .await;
    assert_eq!(ret.err(), Some(ConnectorError::InvalidTransaction));
}
