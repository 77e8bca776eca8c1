//! Interactive console demo for the ElGamal engine.
//!
//! Thin glue only: every cryptographic decision lives in the library. The
//! demo keeps a [`KeyStore`] on its own stack frame and maps human-chosen
//! names to key pairs and stored ciphertexts.

use std::io::{self, BufRead, Write};

use elgamal_engine::{
    decrypt, encrypt, generate_keypair, EncryptConfig, KeyGenConfig, KeyStore, Result,
};

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

fn menu() {
    println!("1. Generate keys");
    println!("2. Show keys");
    println!("3. Encrypt");
    println!("4. Decrypt");
    println!("5. Show available ciphers");
    println!("6. Exit");
}

fn generate(store: &mut KeyStore, name: &str) -> Result<()> {
    let pair = generate_keypair(&KeyGenConfig::default())?;
    println!(
        "Public key : ({}, {}, {})",
        pair.public.p, pair.public.g, pair.public.h
    );
    println!("Private key : {}", pair.private.a);
    store.add_key_pair(name, pair)
}

fn encrypt_for(store: &mut KeyStore, name: &str, message: &str) -> Result<()> {
    let pair = store
        .key_pair(name)
        .ok_or_else(|| elgamal_engine::Error::UnknownName(name.to_string()))?;
    let public = pair.public.clone();
    let ct = encrypt(message, &public, &EncryptConfig::default())?;
    println!("Public key used: ({}, {}, {})", public.p, public.g, public.h);
    println!("Cipher-text : ({}, {:?})", ct.alpha, ct.beta);
    store.push_ciphertext(name, ct)?;
    Ok(())
}

fn decrypt_at(store: &KeyStore, index: usize) -> Result<()> {
    let Some(stored) = store.ciphertext(index) else {
        println!("Incorrect index!");
        return Ok(());
    };
    // The owner is guaranteed registered by the store's push invariant.
    let pair = store
        .key_pair(&stored.owner)
        .ok_or_else(|| elgamal_engine::Error::UnknownName(stored.owner.clone()))?;
    println!("Private key used : {}", pair.private.a);
    println!("Key belongs to : {}", stored.owner);
    let message = decrypt(&stored.ciphertext, &pair.public.p, &pair.private.a)?;
    println!("Original message: {message}");
    Ok(())
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut store = KeyStore::new();

    loop {
        menu();
        let option = prompt(&mut input, "Option: ")?;
        match option.as_str() {
            "1" => {
                let name = prompt(&mut input, "Name : ")?;
                if store.key_pair(&name).is_some() {
                    println!("That name already exists!");
                    continue;
                }
                println!("Generating keys...This shouldn't take long.");
                if let Err(e) = generate(&mut store, &name) {
                    println!("Key generation failed: {e}");
                }
            }
            "2" => {
                for (name, pair) in store.iter() {
                    println!("Name : {name}");
                    println!(
                        "Public key : ({}, {}, {})",
                        pair.public.p, pair.public.g, pair.public.h
                    );
                    println!("Private key : {}", pair.private.a);
                }
            }
            "3" => {
                let name = prompt(&mut input, "Enter name from whom to take public key: ")?;
                if store.key_pair(&name).is_none() {
                    println!("That person doesnt have any keys generated!");
                    continue;
                }
                let message = prompt(&mut input, "Enter message: ")?;
                if let Err(e) = encrypt_for(&mut store, &name, &message) {
                    println!("Encryption failed: {e}");
                }
            }
            "4" => {
                let raw = prompt(&mut input, "Give the index for the cipher you want to decrypt: ")?;
                match raw.parse::<usize>() {
                    Ok(index) => {
                        if let Err(e) = decrypt_at(&store, index) {
                            println!("Decryption failed: {e}");
                        }
                    }
                    Err(_) => println!("Incorrect index!"),
                }
            }
            "5" => {
                for (i, stored) in store.ciphertexts().iter().enumerate() {
                    println!(
                        "c{i} = ({}, {:?}) - encrypted with {}'s public key",
                        stored.ciphertext.alpha, stored.ciphertext.beta, stored.owner
                    );
                }
            }
            "6" => {
                println!("Bye bye!");
                return Ok(());
            }
            _ => println!("Wrong option!"),
        }
    }
}
