use crate::lms::private::SigningKey;
use crate::lms::public::VerifyingKey;
use signature::Keypair;

impl Keypair for SigningKey {
    type VerifyingKey = VerifyingKey;

    fn verifying_key(&self) -> Self::VerifyingKey {
        self.public()
    }
}
