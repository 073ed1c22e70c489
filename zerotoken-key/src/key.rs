use std::borrow::Cow;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A key pair with a public and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetricKey<'a, P, S>
where
    P: Clone,
{
    pub(crate) public: Cow<'a, P>,
    pub(crate) private: S,
}

/// A public key.
pub type PubKey<'a, P> = AsymmetricKey<'a, P, ()>;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<P> PubKey<'_, P>
where
    P: Clone,
{
    /// Detaches the public key from whatever key pair it borrows from.
    pub fn into_owned(self) -> PubKey<'static, P> {
        PubKey {
            public: Cow::Owned(self.public.into_owned()),
            private: (),
        }
    }
}
