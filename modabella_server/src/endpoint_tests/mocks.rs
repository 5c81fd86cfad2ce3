use mockall::mock;
use modabella_engine::{
    db_types::{NewOrder, Order, OrderId, OrderItem, OrderStatus, StockDirection},
    traits::{
        Mailer,
        MailerError,
        PaymentHandle,
        PaymentProvider,
        PaymentProviderError,
        PaymentState,
        PreferenceSpec,
        SettleOrderResult,
        ShopDatabase,
        ShopDatabaseError,
    },
};

mock! {
    pub ShopDb {}
    impl ShopDatabase for ShopDb {
        fn url(&self) -> &str;
        async fn insert_order(&self, order: &NewOrder) -> Result<Order, ShopDatabaseError>;
        async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, ShopDatabaseError>;
        async fn fetch_order_items(&self, id: OrderId) -> Result<Vec<OrderItem>, ShopDatabaseError>;
        async fn settle_order(
            &self,
            id: OrderId,
            status: OrderStatus,
            payment_id: &str,
            adjust_stock: Option<StockDirection>,
        ) -> Result<SettleOrderResult, ShopDatabaseError>;
        async fn close(&mut self) -> Result<(), ShopDatabaseError>;
    }
    impl Clone for ShopDb {
        fn clone(&self) -> Self;
    }
}

mock! {
    pub PaymentProcessor {}
    impl PaymentProvider for PaymentProcessor {
        async fn create_preference(&self, spec: &PreferenceSpec) -> Result<PaymentHandle, PaymentProviderError>;
        async fn payment_state(&self, payment_id: u64) -> Result<PaymentState, PaymentProviderError>;
    }
    impl Clone for PaymentProcessor {
        fn clone(&self) -> Self;
    }
}

mock! {
    pub ConfirmationMailer {}
    impl Mailer for ConfirmationMailer {
        async fn send_order_confirmation(&self, recipient: &str, order_id: OrderId) -> Result<(), MailerError>;
    }
    impl Clone for ConfirmationMailer {
        fn clone(&self) -> Self;
    }
}
