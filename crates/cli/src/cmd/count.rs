use treemint::{ContractGateway, MintController, MintError, WalletProvider};

/// `treemint count`
pub async fn run<W, C>(controller: &MintController<W, C>) -> Result<(), MintError>
where
    W: WalletProvider + ?Sized,
    C: ContractGateway + ?Sized,
{
    controller.connect_wallet().await?;
    let minted = controller.get_minted_count().await?;
    println!("{minted}");
    Ok(())
}
