//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use mb_common::Cents;
use modabella_engine::{
    db_types::{NewOrder, NewOrderItem},
    traits::{Mailer, PaymentProvider, ShopDatabase},
    CheckoutApi,
    OrderFlowApi,
    ReconcileOutcome,
};

use crate::{
    data_objects::{CheckoutRequest, CheckoutResponse, JsonResponse, WebhookNotification},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ---------------------------------------------   Checkout  ---------------------------------------------------
route!(checkout => Post "/api/checkout" impl ShopDatabase, PaymentProvider);
pub async fn checkout<B, P>(
    body: web::Json<CheckoutRequest>,
    api: web::Data<CheckoutApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: ShopDatabase,
    P: PaymentProvider,
{
    let request = body.into_inner();
    debug!("🛒️ POST checkout with {} line items", request.items.len());
    let new_order = new_order_from_request(request)?;
    let summary = api.process_checkout(new_order).await?;
    info!("🛒️ Order {} created, preference {}", summary.order.id, summary.preference_id);
    Ok(HttpResponse::Ok().json(CheckoutResponse {
        message: "Pedido criado com sucesso".to_string(),
        order_id: summary.order.id.value(),
        init_point: summary.redirect_url,
    }))
}

fn new_order_from_request(request: CheckoutRequest) -> Result<NewOrder, ServerError> {
    let total =
        Cents::try_from(request.total).map_err(|e| ServerError::InvalidRequestBody(format!("total: {e}")))?;
    let items = request
        .items
        .into_iter()
        .map(|item| {
            let price = Cents::try_from(item.price)
                .map_err(|e| ServerError::InvalidRequestBody(format!("item '{}': {e}", item.name)))?;
            Ok(NewOrderItem::new(item.product_id, item.name, price, item.quantity))
        })
        .collect::<Result<Vec<_>, ServerError>>()?;
    let mut order = NewOrder::new(request.user_id, total, items);
    if let Some(email) = request.email.filter(|e| !e.trim().is_empty()) {
        order = order.with_buyer_email(email);
    }
    Ok(order)
}

// ----------------------------------------   Payment webhook  -------------------------------------------------
route!(payment_webhook => Post "/api/payment/webhook" impl ShopDatabase, PaymentProvider, Mailer);
/// Handles a payment notification from the processor.
///
/// The response is always 200, whatever happens: any other status makes the processor re-deliver the
/// notification, and a redelivery cannot fix a malformed body or an internal failure.
pub async fn payment_webhook<B, P, M>(
    body: web::Bytes,
    api: web::Data<OrderFlowApi<B, P, M>>,
) -> HttpResponse
where
    B: ShopDatabase,
    P: PaymentProvider,
    M: Mailer,
{
    let notification = match serde_json::from_slice::<WebhookNotification>(&body) {
        Ok(n) => n,
        Err(e) => {
            warn!("💰️ Discarding webhook notification with an unreadable body. {e}");
            return HttpResponse::Ok().json(JsonResponse::failure("Could not read the notification body."));
        },
    };
    if !notification.is_payment() {
        trace!("💰️ Ignoring webhook notification of type {:?}", notification.kind);
        return HttpResponse::Ok().json(JsonResponse::success("Notification ignored."));
    }
    let Some(payment_id) = notification.payment_id() else {
        warn!("💰️ Payment notification without a usable payment id. Ignoring.");
        return HttpResponse::Ok().json(JsonResponse::failure("Notification carries no payment id."));
    };
    let result = match api.process_payment_notification(payment_id).await {
        Ok(ReconcileOutcome::Settled { order, .. }) => {
            info!("💰️ Payment #{payment_id} reconciled. Order {} is now {}", order.id, order.status);
            JsonResponse::success("Notification processed.")
        },
        Ok(ReconcileOutcome::AlreadyPaid(order_id)) => {
            info!("💰️ Payment #{payment_id} is a replay for order {order_id}.");
            JsonResponse::success("Order already settled.")
        },
        Ok(ReconcileOutcome::UnknownOrder(reference)) => {
            warn!("💰️ Payment #{payment_id} references unknown order {reference}.");
            JsonResponse::failure("Unknown order.")
        },
        Ok(ReconcileOutcome::UnmatchedReference) => {
            info!("💰️ Payment #{payment_id} carries no order reference.");
            JsonResponse::failure("No order reference.")
        },
        Err(e) => {
            // Still a 200. The engine has logged the detail; a retry storm would not help.
            warn!("💰️ Could not reconcile payment #{payment_id}. {e}");
            JsonResponse::failure("Could not process the notification.")
        },
    };
    HttpResponse::Ok().json(result)
}
