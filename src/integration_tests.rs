#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::checkout::{CartError, Checkout};
    use crate::clients::{CouponClient, OrderClient, UserClient};
    use crate::domain::{
        Actor, Coupon, CouponCreate, ExpiresAt, MenuItem, Order, OrderStatus, PaymentMethod, Role,
        SignInIdentity, User,
    };
    use crate::mock_framework::{
        create_mock_client, expect_action, expect_create, expect_get, expect_get_or_put, expect_list,
        expect_put,
    };
    use crate::notifications::Notifier;
    use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
    use crate::session::Session;
    use crate::user_actor::UserError;

    fn client_user() -> User {
        let mut user = User::new("Carla", "carla@example.com", Role::Client);
        user.id = "user_1".to_string();
        user.address = Some("Belgrano 123".to_string());
        user
    }

    fn pizza() -> MenuItem {
        MenuItem {
            id: "1".to_string(),
            name: "Pizza".to_string(),
            price: 500.0,
            category: "pizzas".to_string(),
            image: String::new(),
            available: true,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_order_placement_flow() {
        // 1. Setup Mocks
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (coupon_client_inner, mut coupon_rx) = create_mock_client::<Coupon>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);

        let user_client = UserClient::new(user_client_inner);
        let order_client = OrderClient::new(order_client_inner, user_client);
        let coupon_client = CouponClient::new(coupon_client_inner);

        let session = Session::for_user(&client_user());
        let mut checkout = Checkout::new(Some(session), coupon_client, order_client, Notifier::disabled());

        // 2. Fill the cart, apply a coupon and confirm in background
        let now = Timestamp::now();
        let checkout_task = tokio::spawn(async move {
            checkout.add(&pizza(), 2)?;
            checkout.apply_coupon_at("50OFF", now).await?;
            checkout.confirm_order_at(now).await
        });

        // 3. Verify Interactions

        // Expect Coupon Get
        let (code, responder) = expect_get(&mut coupon_rx).await.expect("Expected Coupon Get");
        assert_eq!(code, "50OFF");
        let coupon = Coupon {
            code,
            discount: 50.0,
            description: String::new(),
            expires_at: ExpiresAt::Text("2999-01-01".to_string()),
            is_active: true,
        };
        responder.send(Ok(Some(coupon))).unwrap();

        // Expect User Get
        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "user_1");
        responder.send(Ok(Some(client_user()))).unwrap();

        // Expect Order Create
        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.user_id, "user_1");
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].quantity, 2);
        assert_eq!(payload.total, 500.0);
        assert_eq!(payload.discount, 500.0);
        assert_eq!(payload.address.as_deref(), Some("Belgrano 123"));
        assert_eq!(payload.payment, PaymentMethod::Cash);
        assert_eq!(payload.timestamp, now.as_millisecond());
        responder.send(Ok("order_1".to_string())).unwrap();

        // 4. Verify Result
        let result = checkout_task.await.unwrap();
        assert_eq!(result, Ok("order_1".to_string()));
    }

    #[tokio::test]
    async fn test_confirm_without_session_never_reaches_the_store() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (coupon_client_inner, _coupon_rx) = create_mock_client::<Coupon>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);

        let order_client = OrderClient::new(order_client_inner, UserClient::new(user_client_inner));
        let (notifier, mut notifications) = Notifier::channel();
        let mut checkout = Checkout::new(None, CouponClient::new(coupon_client_inner), order_client, notifier);

        checkout.add(&pizza(), 1).unwrap();
        let result = checkout.confirm_order().await;

        assert_eq!(result, Err(CartError::AuthRequired));
        assert!(order_rx.try_recv().is_err());
        assert!(user_rx.try_recv().is_err());
        let notification = notifications.recv().await.expect("Expected a notification");
        assert_eq!(notification.message, "Inicia sesión para confirmar tu pedido.");
        assert_eq!(checkout.cart().items().len(), 1);
    }

    #[tokio::test]
    async fn test_coupon_with_oversized_discount_is_rejected() {
        let (user_client_inner, _user_rx) = create_mock_client::<User>(10);
        let (coupon_client_inner, mut coupon_rx) = create_mock_client::<Coupon>(10);
        let (order_client_inner, _order_rx) = create_mock_client::<Order>(10);

        let order_client = OrderClient::new(order_client_inner, UserClient::new(user_client_inner));
        let (notifier, mut notifications) = Notifier::channel();
        let session = Session::for_user(&client_user());
        let mut checkout = Checkout::new(Some(session), CouponClient::new(coupon_client_inner), order_client, notifier);

        let task = tokio::spawn(async move {
            checkout.add(&pizza(), 1)?;
            let result = checkout.apply_coupon_at("MEGA", Timestamp::now()).await;
            Ok::<_, CartError>((checkout, result))
        });

        let (code, responder) = expect_get(&mut coupon_rx).await.expect("Expected Coupon Get");
        let coupon = Coupon {
            code,
            discount: 150.0,
            description: String::new(),
            expires_at: ExpiresAt::Text("2999-01-01".to_string()),
            is_active: true,
        };
        responder.send(Ok(Some(coupon))).unwrap();

        let (checkout, result) = task.await.unwrap().expect("cart accepts the pizza");
        assert_eq!(result, Err(CartError::InvalidCoupon("MEGA".to_string())));
        assert_eq!(checkout.cart().discount_percentage(), 0.0);
        assert_eq!(checkout.cart().total(), 500.0);
        let notification = notifications.recv().await.expect("Expected a notification");
        assert_eq!(notification.title, "Cupón Inválido");
    }

    #[tokio::test]
    async fn test_delivery_assignment_checks_the_target_role() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_client_inner, UserClient::new(user_client_inner));

        // A client cannot be assigned as the delivery person.
        let task = {
            let order_client = order_client.clone();
            tokio::spawn(async move {
                order_client
                    .assign_delivery("order_1".to_string(), Actor::Admin, "user_1".to_string())
                    .await
            })
        };
        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        responder.send(Ok(Some(client_user()))).unwrap();
        assert!(matches!(task.await.unwrap(), Err(OrderError::InvalidUser(_))));
        assert!(order_rx.try_recv().is_err());

        // A delivery person is.
        let task = tokio::spawn(async move {
            order_client
                .assign_delivery("order_1".to_string(), Actor::Admin, "d1".to_string())
                .await
        });
        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        let mut rider = User::new("Dante", "dante@example.com", Role::Delivery);
        rider.id = "d1".to_string();
        responder.send(Ok(Some(rider))).unwrap();

        let (order_id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(order_id, "order_1");
        assert_eq!(
            action,
            OrderAction::AssignDelivery { by: Actor::Admin, delivery_id: "d1".to_string() }
        );
        responder
            .send(Ok(OrderActionResult::DeliveryAssigned { previous: None }))
            .unwrap();
        assert_eq!(
            task.await.unwrap(),
            Ok(OrderActionResult::DeliveryAssigned { previous: None })
        );
    }

    #[tokio::test]
    async fn test_non_admins_cannot_assign() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (order_client_inner, _order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_client_inner, UserClient::new(user_client_inner));

        let by = Actor::Delivery { delivery_id: "d1".to_string() };
        let result = order_client
            .assign_delivery("order_1".to_string(), by, "d1".to_string())
            .await;
        assert!(matches!(result, Err(OrderError::Forbidden(_))));
        assert!(user_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_order_has_no_receipt() {
        let (user_client_inner, _user_rx) = create_mock_client::<User>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_client_inner, UserClient::new(user_client_inner));

        let task = tokio::spawn(async move { order_client.order_receipt("order_404".to_string()).await });
        let (_, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::NotFound("order_404".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delivered_orders_stay_delivered() {
        use crate::app_system::{AppConfig, DeliverySystem};
        use crate::domain::{OrderCreate, OrderItem};
        use clap::Parser;

        let config = AppConfig::try_parse_from(["food-delivery"]).unwrap();
        let system = DeliverySystem::new(&config);
        let users = &system.user_client;

        let client_id = users
            .create_user(crate::domain::UserCreate {
                name: "Carla".to_string(),
                email: "carla@example.com".to_string(),
                role: Role::Client,
            })
            .await
            .unwrap();
        let rider_id = users
            .create_user(crate::domain::UserCreate {
                name: "Dante".to_string(),
                email: "dante@example.com".to_string(),
                role: Role::Client,
            })
            .await
            .unwrap();
        users.promote_to_delivery(rider_id.clone()).await.unwrap();

        let order_id = system
            .order_client
            .place_order(OrderCreate {
                user_id: client_id.clone(),
                items: vec![OrderItem {
                    id: "1".to_string(),
                    name: "Pizza".to_string(),
                    quantity: 1,
                    price: 500.0,
                    image: String::new(),
                }],
                total: 500.0,
                discount: 0.0,
                address: None,
                comments: None,
                payment: PaymentMethod::Transfer,
                timestamp: 0,
            })
            .await
            .unwrap();

        let orders = &system.order_client;
        orders
            .assign_delivery(order_id.clone(), Actor::Admin, rider_id.clone())
            .await
            .unwrap();
        let rider = Actor::Delivery { delivery_id: rider_id.clone() };
        orders
            .change_status(order_id.clone(), rider, OrderStatus::Delivered)
            .await
            .unwrap();

        assert!(matches!(
            orders.change_status(order_id.clone(), Actor::Admin, OrderStatus::Pending).await,
            Err(OrderError::Finalized { .. })
        ));
        assert!(matches!(
            orders.cancel_order(order_id.clone(), client_id).await,
            Err(OrderError::Finalized { .. })
        ));
        assert!(matches!(
            orders.delete_order(order_id.clone()).await,
            Err(OrderError::DeletionNotAllowed(_))
        ));

        let order = orders.get_order(order_id).await.unwrap().expect("order stored");
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.delivery_id, Some(rider_id));
        assert_eq!(order.change, None);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_first_provider_sign_in_stores_the_uid() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let users = UserClient::new(user_client_inner);

        let task = tokio::spawn(async move {
            users
                .sign_in_with_provider(SignInIdentity {
                    uid: "uid-7".to_string(),
                    email: Some("nuevo@example.com".to_string()),
                    display_name: None,
                })
                .await
        });

        let (uid, params, responder) = expect_get_or_put(&mut user_rx).await.expect("Expected User GetOrPut");
        assert_eq!(uid, "uid-7");
        assert_eq!(params.role, Role::Client);
        assert_eq!(params.name, "Usuario de Google");
        let mut user = User::new(params.name, params.email, params.role);
        user.id = uid;
        responder.send(Ok((user, true))).unwrap();

        let sign_in = task.await.unwrap().expect("sign-in succeeds");
        assert!(sign_in.is_new);
        assert_eq!(sign_in.session.user_id, "uid-7");
        assert!(user_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_returning_provider_user_keeps_the_stored_record() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let users = UserClient::new(user_client_inner);

        let task = tokio::spawn(async move {
            users
                .sign_in_with_provider(SignInIdentity {
                    uid: "uid-8".to_string(),
                    email: Some("dante@example.com".to_string()),
                    display_name: Some("Dante".to_string()),
                })
                .await
        });

        let (uid, _, responder) = expect_get_or_put(&mut user_rx).await.expect("Expected User GetOrPut");
        let mut stored = User::new("Dante", "dante@example.com", Role::Delivery);
        stored.id = uid;
        responder.send(Ok((stored, false))).unwrap();

        let sign_in = task.await.unwrap().expect("sign-in succeeds");
        assert!(!sign_in.is_new);
        assert_eq!(sign_in.session.role, Role::Delivery);
        assert!(user_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_email_sign_in_scans_the_user_list() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let users = UserClient::new(user_client_inner);

        let task = tokio::spawn(async move { users.sign_in_with_email("nadie@example.com").await });
        let responder = expect_list(&mut user_rx).await.expect("Expected User List");
        responder.send(Ok(vec![client_user()])).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(UserError::NotFound("nadie@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_coupons_are_stored_under_their_code() {
        let (coupon_client_inner, mut coupon_rx) = create_mock_client::<Coupon>(10);
        let coupons = CouponClient::new(coupon_client_inner);

        let task = tokio::spawn(async move {
            let params = CouponCreate {
                discount: 10.0,
                description: "Bienvenida".to_string(),
                expires_at: ExpiresAt::EpochMillis(4_102_444_800_000),
            };
            coupons.add_coupon("HOLA10".to_string(), params).await
        });

        let (code, params, responder) = expect_put(&mut coupon_rx).await.expect("Expected Coupon Put");
        assert_eq!(code, "HOLA10");
        let coupon = Coupon {
            code,
            discount: params.discount,
            description: params.description,
            expires_at: params.expires_at,
            is_active: true,
        };
        responder.send(Ok(coupon.clone())).unwrap();
        assert_eq!(task.await.unwrap(), Ok(coupon));
    }
}
