use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use nomnom_domain::order::OrderStatus;
use nomnom_domain::pagination::PageRequest;
use nomnom_orders_schema::{order_items, orders};

use crate::domain::repository::OrderRepository;
use crate::domain::types::{Order, OrderItem};
use crate::error::OrdersServiceError;

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), OrdersServiceError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let order = order.clone();
                Box::pin(async move {
                    orders::ActiveModel {
                        id: Set(order.id),
                        customer_id: Set(order.customer_id),
                        restaurant_id: Set(order.restaurant_id),
                        customer_name: Set(order.customer_name.clone()),
                        customer_contact: Set(order.customer_contact.clone()),
                        delivery_address: Set(order.delivery_address.clone()),
                        payment_type: Set(order.payment_type.as_str().to_owned()),
                        status: Set(order.status.as_str().to_owned()),
                        order_total: Set(order.order_total),
                        delivery_fee: Set(order.delivery_fee),
                        discount: Set(order.discount),
                        total_amount: Set(order.total_amount),
                        created_at: Set(order.created_at),
                        cancelled_at: Set(order.cancelled_at),
                        updated_at: Set(order.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    for (position, item) in order.items.iter().enumerate() {
                        order_items::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            order_id: Set(order.id),
                            position: Set(position as i32),
                            item_id: Set(item.item_id.clone()),
                            item_name: Set(item.item_name.clone()),
                            quantity: Set(item.quantity),
                            portion_size: Set(item.portion_size.as_str().to_owned()),
                            unit_price: Set(item.unit_price),
                            line_total: Set(item.line_total),
                            image: Set(item.image.clone()),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create order")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrdersServiceError> {
        let Some(model) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?
        else {
            return Ok(None);
        };
        let mut items = self.load_items(&[model.id]).await?;
        let items = items.remove(&model.id).unwrap_or_default();
        order_from_model(model, items).map(Some)
    }

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let page = page.clamped();
        let models = orders::Entity::find()
            .filter(orders::Column::CustomerId.eq(customer_id))
            .order_by_desc(orders::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list orders by customer")?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut items = self.load_items(&ids).await?;
        models
            .into_iter()
            .map(|model| {
                let lines = items.remove(&model.id).unwrap_or_default();
                order_from_model(model, lines)
            })
            .collect()
    }

    async fn compare_and_set(
        &self,
        updated: &Order,
        expected_status: OrderStatus,
        expected_total: i64,
    ) -> Result<bool, OrdersServiceError> {
        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(updated.status.as_str()))
            .col_expr(orders::Column::Discount, Expr::value(updated.discount))
            .col_expr(orders::Column::TotalAmount, Expr::value(updated.total_amount))
            .col_expr(orders::Column::CancelledAt, Expr::value(updated.cancelled_at))
            .col_expr(orders::Column::UpdatedAt, Expr::value(updated.updated_at))
            .filter(orders::Column::Id.eq(updated.id))
            .filter(orders::Column::Status.eq(expected_status.as_str()))
            .filter(orders::Column::TotalAmount.eq(expected_total))
            .exec(&self.db)
            .await
            .context("compare-and-set order")?;
        Ok(result.rows_affected == 1)
    }
}

impl DbOrderRepository {
    /// Items of every order in `order_ids`, grouped by order and in cart order.
    async fn load_items(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<OrderItem>>, OrdersServiceError> {
        let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        if order_ids.is_empty() {
            return Ok(grouped);
        }
        let models = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(order_ids.iter().copied()))
            .order_by_asc(order_items::Column::OrderId)
            .order_by_asc(order_items::Column::Position)
            .all(&self.db)
            .await
            .context("load order items")?;
        for model in models {
            let order_id = model.order_id;
            grouped
                .entry(order_id)
                .or_default()
                .push(item_from_model(model)?);
        }
        Ok(grouped)
    }
}

fn item_from_model(model: order_items::Model) -> Result<OrderItem, OrdersServiceError> {
    let portion_size = model
        .portion_size
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt portion size on order item {}: {e}", model.id))?;
    Ok(OrderItem {
        item_id: model.item_id,
        item_name: model.item_name,
        quantity: model.quantity,
        portion_size,
        unit_price: model.unit_price,
        line_total: model.line_total,
        image: model.image,
    })
}

fn order_from_model(
    model: orders::Model,
    items: Vec<OrderItem>,
) -> Result<Order, OrdersServiceError> {
    let status = model
        .status
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt status on order {}: {e}", model.id))?;
    let payment_type = model
        .payment_type
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt payment type on order {}: {e}", model.id))?;
    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        restaurant_id: model.restaurant_id,
        customer_name: model.customer_name,
        customer_contact: model.customer_contact,
        delivery_address: model.delivery_address,
        payment_type,
        status,
        items,
        order_total: model.order_total,
        delivery_fee: model.delivery_fee,
        discount: model.discount,
        total_amount: model.total_amount,
        created_at: model.created_at,
        cancelled_at: model.cancelled_at,
        updated_at: model.updated_at,
    })
}
