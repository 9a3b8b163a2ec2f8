use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{SigningKey, VerifyingKey, sha256};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let digest = sha256(b"hello schnorr");
    let sig = sk.sign(&digest).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2 = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    let ok = vk2.verify(&digest, &sig2).expect("verify");
    assert!(ok);
    assert_eq!(sk2.sign(&digest).expect("sign"), sig);

    println!("public key: {}", hex::encode(vk.to_bytes()));
    println!("signature:  {}", hex::encode(sig.to_bytes()));
}
