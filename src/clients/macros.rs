/// Converts a store's `FrameworkError` into the domain error of its entity.
#[macro_export]
macro_rules! impl_from_framework_error {
    ($error:ty) => {
        impl From<$crate::actor_framework::FrameworkError<$error>> for $error {
            fn from(e: $crate::actor_framework::FrameworkError<$error>) -> Self {
                match e {
                    $crate::actor_framework::FrameworkError::NotFound(id) => <$error>::NotFound(id),
                    $crate::actor_framework::FrameworkError::Entity(inner) => inner,
                    other => <$error>::ActorCommunicationError(other.to_string()),
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $singular:ident, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $singular>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.get(id).await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $singular>](&self, id: String) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.delete(id).await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.list().await?)
                }

                /// Full collection now and after every change.
                #[tracing::instrument(skip(self))]
                pub async fn [<subscribe_ $plural>](
                    &self,
                ) -> Result<tokio::sync::watch::Receiver<Vec<$entity>>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.subscribe().await?)
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $singular:ident, $plural:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, $entity, $error, $singular, $plural);
    };
}
