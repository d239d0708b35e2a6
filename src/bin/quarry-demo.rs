#![forbid(unsafe_code)]
//! Offline walkthrough: wallets, a signed transfer, a forged one, a mined
//! block and the resulting balances, printed to the console.

use quarrychain::blockchain::{Blockchain, MINING_REWARD};
use quarrychain::transaction::Transaction;
use quarrychain::wallet::Wallet;

fn print_chain(chain: &Blockchain) {
    for (height, block) in chain.blocks().iter().enumerate() {
        println!("{} Block {} {}", "=".repeat(25), height, "=".repeat(25));
        println!("nonce          {}", block.nonce);
        println!("previous_hash  {}", hex::encode(block.previous_hash));
        println!("time_stamp     {}", block.timestamp);
        for tx in &block.transactions {
            println!("{}", "-".repeat(40));
            println!(" sender     {}", tx.sender);
            println!(" recipient  {}", tx.recipient);
            println!(" value      {:.1}", tx.value);
        }
    }
    println!("{}", "*".repeat(25));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let miner = Wallet::generate();
    let alice = Wallet::generate();
    let bob = Wallet::generate();

    let mut chain = Blockchain::new(miner.address());

    // A properly signed transfer enters the pool.
    let tx = Transaction::new(alice.address(), bob.address(), 5.0);
    let signature = alice.sign_transaction(&tx)?;
    let accepted = chain.submit_transaction(
        alice.address(),
        bob.address(),
        5.0,
        &alice.public_key_bytes(),
        &signature,
    );
    println!("signed transfer accepted: {}", accepted);

    // A forged one does not.
    let forged = [0u8; 64];
    let accepted = chain.submit_transaction(
        bob.address(),
        alice.address(),
        100.0,
        &bob.public_key_bytes(),
        &forged,
    );
    println!("forged transfer accepted: {}", accepted);

    chain.mine();
    print_chain(&chain);

    println!("balance alice  {:>6.1}", chain.balance_of(alice.address()));
    println!("balance bob    {:>6.1}", chain.balance_of(bob.address()));
    println!(
        "balance miner  {:>6.1} (reward per block: {:.1})",
        chain.balance_of(miner.address()),
        MINING_REWARD
    );

    chain.verify()?;
    println!("chain verified");

    Ok(())
}
