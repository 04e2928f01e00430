use treemint::{ContractGateway, MintController, MintError, MintPhase, WalletProvider};
use yansi::Paint;

/// `treemint mint`
///
/// Connects first, then mints and refreshes the counter. Phase changes are printed while the
/// transaction is pending.
pub async fn run<W, C>(controller: &MintController<W, C>) -> Result<(), MintError>
where
    W: WalletProvider + ?Sized,
    C: ContractGateway + ?Sized,
{
    controller.connect_wallet().await?;
    if let Err(err) = controller.get_minted_count().await {
        debug!(%err, "could not refresh the counter before minting");
    }

    let mut phases = controller.subscribe();
    let progress = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().phase;
            match phase {
                MintPhase::AwaitingSigner => println!("{}", "Waiting for the wallet...".dim()),
                MintPhase::Confirming { tx_hash } => {
                    println!("{} {tx_hash}", "Waiting for confirmation of".dim())
                }
                _ => {}
            }
        }
    });

    let result = controller.public_mint().await;
    progress.abort();
    let result = result?;
    info!(tx_hash = %result.tx_hash, "minted");

    if let Err(err) = controller.get_minted_count().await {
        warn!(%err, "could not refresh the counter after minting");
    }
    println!("{}", controller.view());
    Ok(())
}
