pub(crate) mod contents {
    const TOKEN_PLACEHOLDER: &str = "__SESSION_TOKEN__";

    /// The bridge page with the session token baked in.
    pub(crate) fn index_html(session_token: &str) -> String {
        INDEX_HTML.replace(TOKEN_PLACEHOLDER, session_token)
    }

    const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Team Tree</title>
  <meta name="description" content="Create your moments as NFTs" />
  <style>
    body { font-family: sans-serif; background: #14532d; color: #fff; text-align: center; }
    button { font-size: 1.25rem; padding: 0.5rem 1.5rem; margin-top: 2rem; cursor: pointer; }
    #status { margin-top: 1rem; }
  </style>
</head>
<body>
  <p style="font-size: 1.5rem">Mint TeamTree NFTs</p>
  <button id="connect">Connect your wallet</button>
  <p id="status">Waiting for wallet...</p>
  <script>
    const TOKEN = "__SESSION_TOKEN__";
    const status = (text) => { document.getElementById("status").textContent = text; };

    async function api(method, path, body) {
      const res = await fetch("/api" + path, {
        method,
        headers: { "Content-Type": "application/json", "X-Session-Token": TOKEN },
        body: body === undefined ? undefined : JSON.stringify(body),
      });
      return res.json();
    }

    async function report() {
      const accounts = await window.ethereum.request({ method: "eth_accounts" });
      if (accounts.length === 0) {
        await api("POST", "/connection", null);
        status("Wallet disconnected");
        return;
      }
      const chainId = parseInt(await window.ethereum.request({ method: "eth_chainId" }), 16);
      await api("POST", "/connection", { address: accounts[0], chainId });
      status("Connected " + accounts[0] + " on chain " + chainId);
    }

    async function connect() {
      if (!window.ethereum) {
        status("No browser wallet found");
        return;
      }
      try {
        await window.ethereum.request({ method: "eth_requestAccounts" });
        await report();
      } catch (err) {
        status("Connection rejected: " + err.message);
      }
    }

    let busy = false;

    async function poll() {
      if (busy) return;
      const next = await api("GET", "/transaction/request");
      if (next.status !== "ok") return;
      busy = true;
      const { id, input, data, ...tx } = next.data;
      status("Confirm the transaction in your wallet");
      try {
        const hash = await window.ethereum.request({
          method: "eth_sendTransaction",
          params: [{ ...tx, data: data ?? input }],
        });
        await api("POST", "/transaction/response", { id, hash, error: null });
        status("Transaction sent " + hash);
      } catch (err) {
        await api("POST", "/transaction/response", { id, hash: null, error: err.message });
        status("Transaction rejected");
      } finally {
        busy = false;
      }
    }

    document.getElementById("connect").addEventListener("click", connect);
    if (window.ethereum) {
      window.ethereum.on("accountsChanged", report);
      window.ethereum.on("chainChanged", report);
    }
    setInterval(() => poll().catch((err) => status(err.message)), 1000);
  </script>
</body>
</html>
"#;
}
