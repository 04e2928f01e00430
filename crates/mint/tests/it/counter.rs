use crate::utils::Harness;
use treemint::{MintError, NotificationKind, notify::WRONG_NETWORK_MESSAGE};
use treemint_wallets::WalletError;

#[tokio::test(flavor = "multi_thread")]
async fn can_read_minted_count() {
    let h = Harness::fuji();
    h.connect().await;
    assert_eq!(h.controller.state().minted, "0");

    h.contract.set_minted(41);
    assert_eq!(h.controller.get_minted_count().await.unwrap(), "41");
    assert_eq!(h.controller.state().minted, "41");
    assert_eq!(h.controller.view().minted, "41");
    assert!(h.log.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn count_follows_mints() {
    let h = Harness::fuji();
    h.connect().await;
    let mut previous = 0u64;
    for _ in 0..3 {
        h.controller.public_mint().await.unwrap();
        let count: u64 = h.controller.get_minted_count().await.unwrap().parse().unwrap();
        assert!(count > previous);
        previous = count;
    }
    assert_eq!(previous, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_read_keeps_previous_count() {
    let h = Harness::fuji();
    h.connect().await;
    h.contract.set_minted(7);
    h.controller.get_minted_count().await.unwrap();

    h.contract.fail_reads(true);
    let err = h.controller.get_minted_count().await.unwrap_err();
    assert!(matches!(err, MintError::ContractCall(_)), "{err:?}");
    assert_eq!(h.controller.state().minted, "7");
    assert!(h.log.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_network_read_is_refused() {
    let h = Harness::fuji();
    h.connect().await;
    h.contract.set_minted(5);
    h.wallet.switch_chain(1);

    let err = h.controller.get_minted_count().await.unwrap_err();
    assert!(matches!(err, MintError::WrongNetwork { .. }), "{err:?}");
    assert_eq!(h.contract.reads(), 0);
    assert_eq!(h.controller.state().minted, "0");
    assert_eq!(h.log.messages(NotificationKind::Error), vec![WRONG_NETWORK_MESSAGE]);
}

#[tokio::test(flavor = "multi_thread")]
async fn count_requires_connected_wallet() {
    let h = Harness::fuji();
    h.contract.set_minted(5);

    let err = h.controller.get_minted_count().await.unwrap_err();
    assert!(matches!(err, MintError::Connection(WalletError::NotConnected)), "{err:?}");
    assert_eq!(h.wallet.connects(), 0);
    assert_eq!(h.contract.reads(), 0);
    assert_eq!(h.controller.state().minted, "0");
    assert!(h.log.is_empty());
}
