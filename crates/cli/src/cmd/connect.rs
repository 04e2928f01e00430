use treemint::{ContractGateway, MintController, MintError, WalletProvider};
use yansi::Paint;

/// `treemint connect`
pub async fn run<W, C>(controller: &MintController<W, C>) -> Result<(), MintError>
where
    W: WalletProvider + ?Sized,
    C: ContractGateway + ?Sized,
{
    let connection = controller.connect_wallet().await?;
    println!("Connected {} on chain {}", connection.address.cyan(), connection.chain_id);
    println!("{}", controller.view());
    Ok(())
}
