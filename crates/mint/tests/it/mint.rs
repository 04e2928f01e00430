use crate::utils::{ALICE, Harness, MockContract, MockWallet};
use alloy_primitives::utils::parse_ether;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use treemint_wallets::WalletError;
use treemint::{
    ContractCallError, FailureFeedback, MintButton, MintController, MintError, MintPhase,
    MintSettings, NotificationKind, NotificationLog, Reentrancy,
    notify::{MINT_SUCCESS_MESSAGE, WRONG_NETWORK_MESSAGE},
};

fn settings() -> MintSettings {
    MintSettings::default()
}

#[tokio::test(flavor = "multi_thread")]
async fn can_mint() {
    let h = Harness::gated(settings());
    h.controller.connect_wallet().await.unwrap();
    let mut rx = h.controller.subscribe();

    let controller = h.controller.clone();
    let mint = tokio::spawn(async move { controller.public_mint().await });

    // suspended until the transaction is confirmed
    rx.wait_for(|state| matches!(state.phase, MintPhase::Confirming { .. })).await.unwrap();
    assert!(h.controller.state().in_flight());
    assert_eq!(h.controller.view().button, MintButton::Loading);
    assert!(h.log.is_empty());

    let calls = h.contract.mint_calls();
    assert_eq!(calls, vec![(ALICE, parse_ether("0.1").unwrap())]);
    let sent = h.wallet.sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, Some(ALICE));

    h.contract.release(1);
    let result = mint.await.unwrap().unwrap();
    assert!(result.success);
    assert_eq!(result.block_number, Some(1));
    assert_eq!(result.nft_url, settings().nft_url);

    let state = h.controller.state();
    assert_eq!(state.phase, MintPhase::Succeeded { tx_hash: result.tx_hash });
    assert!(!state.in_flight());
    assert!(state.minted_successfully());

    let view = h.controller.view();
    assert_eq!(view.button, MintButton::Mint);
    assert_eq!(view.nft_link, Some(settings().nft_url));

    assert_eq!(h.log.messages(NotificationKind::Success), vec![MINT_SUCCESS_MESSAGE]);
    assert_eq!(h.log.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn mint_uses_configured_price() {
    let price = parse_ether("0.25").unwrap();
    let h = Harness::new(
        MockWallet::new(43113),
        MockContract::new(),
        MintSettings { mint_price: price, ..settings() },
    );
    h.connect().await;
    h.controller.public_mint().await.unwrap();
    assert_eq!(h.contract.mint_calls(), vec![(ALICE, price)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_signature_is_silent() {
    let h = Harness::fuji();
    h.controller.connect_wallet().await.unwrap();
    h.wallet.sender.reject(true);

    let err = h.controller.public_mint().await.unwrap_err();
    assert!(err.is_rejection(), "{err:?}");

    let state = h.controller.state();
    assert_eq!(state.phase, MintPhase::Failed);
    assert!(!state.in_flight());
    assert!(!state.minted_successfully());
    assert!(h.log.is_empty());
    assert_eq!(h.controller.view().button, MintButton::Mint);
}

#[tokio::test(flavor = "multi_thread")]
async fn reverted_mint_is_silent_by_default() {
    let h = Harness::fuji();
    h.connect().await;
    h.contract.revert(true);

    let err = h.controller.public_mint().await.unwrap_err();
    assert!(
        matches!(err, MintError::ContractCall(ContractCallError::Reverted { .. })),
        "{err:?}"
    );
    assert!(!h.controller.state().in_flight());
    assert!(h.log.is_empty());
    assert_eq!(h.contract.minted(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn failure_notification_policy() {
    let h = Harness::new(
        MockWallet::new(43113),
        MockContract::new(),
        MintSettings { on_failure: FailureFeedback::Notify, ..settings() },
    );
    h.connect().await;
    h.contract.revert(true);

    let err = h.controller.public_mint().await.unwrap_err();
    let errors = h.log.messages(NotificationKind::Error);
    assert_eq!(errors, vec![err.to_string()]);
    assert!(errors[0].contains("reverted"));

    // the network guard already told the user, no second notification
    h.log.drain();
    h.wallet.switch_chain(1);
    h.controller.public_mint().await.unwrap_err();
    assert_eq!(h.log.messages(NotificationKind::Error), vec![WRONG_NETWORK_MESSAGE]);
    assert_eq!(h.log.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn failure_keeps_previous_link() {
    let h = Harness::fuji();
    h.controller.connect_wallet().await.unwrap();
    h.controller.public_mint().await.unwrap();
    h.log.drain();

    h.contract.revert(true);
    h.controller.public_mint().await.unwrap_err();

    let state = h.controller.state();
    assert_eq!(state.phase, MintPhase::Failed);
    assert!(state.minted_successfully());
    assert_eq!(h.controller.view().nft_link, Some(settings().nft_url));
    assert!(h.log.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn reentrant_mints_allowed_by_default() {
    let h = Harness::gated(settings());
    assert_eq!(h.controller.settings().reentrancy, Reentrancy::Allow);
    h.connect().await;
    let mut rx = h.controller.subscribe();

    let first = tokio::spawn({
        let controller = h.controller.clone();
        async move { controller.public_mint().await }
    });
    rx.wait_for(|state| matches!(state.phase, MintPhase::Confirming { .. })).await.unwrap();

    let second = tokio::spawn({
        let controller = h.controller.clone();
        async move { controller.public_mint().await }
    });
    while h.contract.mint_calls().len() < 2 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(h.controller.state().in_flight());

    h.contract.release(2);
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(h.contract.minted(), 2);
    assert_eq!(h.log.messages(NotificationKind::Success).len(), 2);
    assert!(!h.controller.state().in_flight());
}

#[tokio::test(flavor = "multi_thread")]
async fn reentrant_mints_rejected() {
    let h = Harness::gated(MintSettings { reentrancy: Reentrancy::Reject, ..settings() });
    h.connect().await;
    let mut rx = h.controller.subscribe();

    let first = tokio::spawn({
        let controller = h.controller.clone();
        async move { controller.public_mint().await }
    });
    rx.wait_for(|state| matches!(state.phase, MintPhase::Confirming { .. })).await.unwrap();

    let err = h.controller.public_mint().await.unwrap_err();
    assert!(matches!(err, MintError::MintInFlight), "{err:?}");
    assert_eq!(h.contract.mint_calls().len(), 1);
    assert!(h.controller.state().in_flight());

    h.contract.release(1);
    first.await.unwrap().unwrap();

    // a new attempt is accepted once the previous one is done
    h.contract.release(1);
    h.controller.public_mint().await.unwrap();
    assert_eq!(h.contract.mint_calls().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn confirmation_timeout() {
    let timeout = Duration::from_millis(50);
    let h = Harness::gated(MintSettings { confirmation_timeout: Some(timeout), ..settings() });
    h.connect().await;

    let err = h.controller.public_mint().await.unwrap_err();
    assert!(matches!(err, MintError::TimedOut(t) if t == timeout), "{err:?}");

    let state = h.controller.state();
    assert_eq!(state.phase, MintPhase::Failed);
    assert!(!state.in_flight());
    assert!(h.log.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn can_cancel_pending_mint() {
    let h = Harness::gated(settings());
    h.connect().await;
    let mut rx = h.controller.subscribe();

    let mint = tokio::spawn({
        let controller = h.controller.clone();
        async move { controller.public_mint().await }
    });
    rx.wait_for(|state| matches!(state.phase, MintPhase::Confirming { .. })).await.unwrap();

    h.controller.cancel();
    let err = mint.await.unwrap().unwrap_err();
    assert!(matches!(err, MintError::Cancelled), "{err:?}");
    assert!(!h.controller.state().in_flight());
    assert!(h.log.is_empty());

    // later operations are not affected
    h.contract.release(1);
    h.controller.public_mint().await.unwrap();
    assert_eq!(h.log.messages(NotificationKind::Success), vec![MINT_SUCCESS_MESSAGE]);
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_cancels_everything() {
    let shutdown = CancellationToken::new();
    let wallet = std::sync::Arc::new(MockWallet::new(43113));
    let contract = std::sync::Arc::new(MockContract::gated());
    let log = NotificationLog::new();
    let controller = std::sync::Arc::new(MintController::with_cancellation(
        wallet,
        contract.clone(),
        std::sync::Arc::new(log.clone()),
        settings(),
        shutdown.clone(),
    ));
    controller.connect_wallet().await.unwrap();
    let mut rx = controller.subscribe();

    let mint = tokio::spawn({
        let controller = controller.clone();
        async move { controller.public_mint().await }
    });
    rx.wait_for(|state| matches!(state.phase, MintPhase::Confirming { .. })).await.unwrap();

    shutdown.cancel();
    let err = mint.await.unwrap().unwrap_err();
    assert!(matches!(err, MintError::Cancelled), "{err:?}");

    let err = controller.get_minted_count().await.unwrap_err();
    assert!(matches!(err, MintError::Cancelled), "{err:?}");
    assert_eq!(contract.reads(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn mint_requires_connected_wallet() {
    let h = Harness::new(
        MockWallet::new(43113),
        MockContract::new(),
        MintSettings { on_failure: FailureFeedback::Notify, ..settings() },
    );

    let err = h.controller.public_mint().await.unwrap_err();
    assert!(matches!(err, MintError::Connection(WalletError::NotConnected)), "{err:?}");

    // nothing reached the wallet or the contract
    assert_eq!(h.wallet.connects(), 0);
    assert_eq!(h.contract.calls(), 0);
    assert!(h.wallet.sender.sent().is_empty());
    assert_eq!(h.controller.state().phase, MintPhase::Idle);
    assert!(h.log.is_empty());

    h.connect().await;
    h.controller.public_mint().await.unwrap();
    assert_eq!(h.contract.mint_calls().len(), 1);
}
