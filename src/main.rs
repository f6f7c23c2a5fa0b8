use food_delivery::app_system::{setup_tracing, AppConfig, DeliverySystem};
use food_delivery::dashboards::{AdminDashboard, ClientDashboard, DashboardKind, DeliveryDashboard};
use food_delivery::domain::{
    available, Actor, CatalogItemCreate, CouponCreate, ExpiresAt, OrderStatus, Role, SignInIdentity,
    UserCreate,
};
use food_delivery::notifications::Notifier;
use food_delivery::routes::guard;
use jiff::{Timestamp, ToSpan};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    setup_tracing(&config.logging)?;

    info!("Starting food delivery system");
    let system = DeliverySystem::new(&config);

    // Seed the catalog and a coupon as an admin would.
    let admin_id = system
        .user_client
        .create_user(UserCreate {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Admin,
        })
        .await?;
    let admin = system.user_client.sign_in_with_email("ada@example.com").await?;
    info!(%admin_id, dashboard = ?DashboardKind::for_role(admin.role).map(|kind| kind.path()), "Admin signed in");

    let catalog = &system.catalog_client;
    catalog
        .create_item(
            CatalogItemCreate::new("Pizza muzzarella", 500.0)
                .with_category("pizzas")
                .with_image("pizza.png"),
        )
        .await?;
    catalog
        .create_item(CatalogItemCreate::new("Combo familiar", 1800.0).with_description("2 pizzas + bebida"))
        .await?;

    let expires_at = Timestamp::now().checked_add(48.hours())?;
    system
        .coupon_client
        .add_coupon(
            "50OFF".to_string(),
            CouponCreate {
                discount: 50.0,
                description: "Mitad de precio".to_string(),
                expires_at: ExpiresAt::from(expires_at),
            },
        )
        .await?;

    // A delivery person joins.
    let rider = system
        .user_client
        .sign_in_with_provider(SignInIdentity {
            uid: "rider-uid".to_string(),
            email: Some("dante@example.com".to_string()),
            display_name: Some("Dante".to_string()),
        })
        .await?;
    system
        .user_client
        .promote_to_delivery(rider.session.user_id.clone())
        .await?;

    // A client signs in and orders.
    let sign_in = system
        .user_client
        .sign_in_with_provider(SignInIdentity {
            uid: "client-uid".to_string(),
            email: Some("carla@example.com".to_string()),
            display_name: None,
        })
        .await?;
    let client = sign_in.session;
    info!(is_new = sign_in.is_new, decision = ?guard("/confirm-order", Some(&client)), "Client signed in");

    let (notifier, mut notifications) = Notifier::channel();
    let mut checkout = system.checkout(Some(client.clone()), notifier);

    let menu = system.catalog_client.menu.list_menu_items().await?;
    let promotions = system.catalog_client.promotions.list_promotions().await?;
    for item in available(&menu) {
        checkout.add(&item, 2)?;
    }
    if let Some(promotion) = available(&promotions).first() {
        checkout.add(promotion, 1)?;
    }
    checkout.set_comments("Sin cebolla, por favor")?;

    let span = tracing::info_span!("checkout", user_id = %client.user_id);
    let order_id = async {
        if let Err(e) = checkout.apply_coupon("50OFF").await {
            error!(error = %e, "Coupon rejected");
        }
        info!(
            subtotal = checkout.cart().subtotal(),
            discount = checkout.cart().discount_amount(),
            total = checkout.cart().total(),
            "Cart ready"
        );
        checkout.confirm_order().await
    }
    .instrument(span)
    .await?;
    drop(checkout);

    while let Ok(notification) = notifications.try_recv() {
        info!(title = %notification.title, color = notification.severity.color(), "Shown to client");
    }

    let receipt = system.order_client.order_receipt(order_id.clone()).await?;
    info!(receipt = %serde_json::to_string(&receipt)?, "Order receipt");

    // The admin hands it to the rider, who delivers it.
    let admin_actor = admin.actor().ok_or("admin session has no actor")?;
    system
        .order_client
        .change_status(order_id.clone(), admin_actor.clone(), OrderStatus::Preparing)
        .await?;
    system
        .order_client
        .assign_delivery(order_id.clone(), admin_actor, rider.session.user_id.clone())
        .await?;
    system
        .order_client
        .change_status(
            order_id.clone(),
            Actor::Delivery { delivery_id: rider.session.user_id.clone() },
            OrderStatus::Delivered,
        )
        .await?;

    if let Err(e) = system.order_client.cancel_order(order_id.clone(), client.user_id.clone()).await {
        info!(error = %e, "Late cancellation rejected");
    }

    let orders = system.order_client.list_orders().await?;
    let users = system.user_client.list_users().await?;
    let client_view = ClientDashboard::build(&client.user_id, &orders, &users);
    let delivery_view = DeliveryDashboard::build(&rider.session.user_id, &orders);
    let admin_view = AdminDashboard::build(&orders, &users);
    info!(
        current = ?client_view.current.map(|order| order.id),
        history = client_view.history.len(),
        delivered = delivery_view.history.len(),
        editable = admin_view.editable.len(),
        "Dashboards"
    );

    client.logout();
    admin.logout();

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
