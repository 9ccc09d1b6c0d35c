use actix_web::{
  Error,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};

/// Terminal error-logging middleware.
///
/// Wraps the whole chain and logs every request that fails — whatever raised
/// the error upstream (payload parsing, schema validation, controllers,
/// services, the unmatched-route fallback) — exactly once, with the method,
/// path, and error message. Response construction itself stays with the
/// `ResponseError` implementation.
#[derive(Debug, Clone, Default)]
pub struct ErrorLogger;

impl ErrorLogger {
  /// Creates a new error logging middleware
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = ErrorLoggerService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(ErrorLoggerService {
      service: Rc::new(service),
    }))
  }
}

pub struct ErrorLoggerService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let method = req.method().clone();
    let uri = req.uri().clone();

    Box::pin(async move {
      match service.call(req).await {
        Ok(res) => {
          // Handler errors are folded into the response by the framework;
          // the original error is still attached to it.
          if let Some(err) = res.response().error() {
            tracing::error!("Error occurred on {} {}: {}", method, uri, err);
          }
          Ok(res)
        }
        Err(err) => {
          tracing::error!("Error occurred on {} {}: {}", method, uri, err);
          Err(err)
        }
      }
    })
  }
}
