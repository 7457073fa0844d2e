use crate::ots::private::SigningKey;
use crate::ots::public::VerifyingKey;
use signature::Keypair;

impl Keypair for SigningKey {
    type VerifyingKey = VerifyingKey;

    fn verifying_key(&self) -> Self::VerifyingKey {
        self.public()
    }
}
