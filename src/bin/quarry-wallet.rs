#![forbid(unsafe_code)]
//! Generate a fresh wallet and print its keys and ledger address.

use quarrychain::wallet::Wallet;

fn main() {
    let wallet = Wallet::generate();

    println!("private_key: {}", wallet.secret_key_hex());
    println!("public_key:  {}", wallet.public_key_hex());
    println!("address:     {}", wallet.address());
}
