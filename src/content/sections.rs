// Built-in documentation sections
//
// Alerts are block quotes led by an icon; endpoint cards are `###` headings
// whose first word is the HTTP method.

use super::ContentDescriptor;

pub static INTRODUCTION: ContentDescriptor = ContentDescriptor {
    id: "introduction",
    title: "Introduction",
    body: r##"# Welcome to the API Documentation

Our REST API provides a simple and powerful way to integrate with our platform.
This documentation will help you get started quickly and provide detailed
information about all available endpoints.

> ℹ This API uses conventional HTTP response codes to indicate success or failure of requests.

## Base URL

```text title="Base URL"
https://api.example.com/v1
```

## Rate Limiting

API requests are limited to **1000 requests per hour** per API key.
"##,
};

pub static QUICKSTART: ContentDescriptor = ContentDescriptor {
    id: "quickstart",
    title: "Quick Start",
    body: r##"# Quick Start Guide

Get up and running with our API in just a few minutes.

## 1. Get your API Key

First, you'll need to obtain an API key from your dashboard.

## 2. Make your first request

```bash title="cURL Example"
curl -X GET "https://api.example.com/v1/users" \
  -H "Authorization: Bearer YOUR_API_KEY"
```

## 3. Handle the response

```json title="Response"
{
  "data": [
    {
      "id": "user_123",
      "name": "John Doe",
      "email": "john@example.com",
      "created_at": "2024-01-01T00:00:00Z"
    }
  ],
  "meta": {
    "total": 1,
    "page": 1,
    "per_page": 10
  }
}
```
"##,
};

pub static AUTHENTICATION: ContentDescriptor = ContentDescriptor {
    id: "authentication",
    title: "Authentication",
    body: r##"# Authentication

Learn how to authenticate your requests to access our API.

> ⚠ Keep your API keys secure and never expose them in client-side code.

## API Key Authentication

Include your API key in the `Authorization` header:

```text title="Authorization Header"
Authorization: Bearer YOUR_API_KEY
```

## Example Request

```javascript title="JavaScript Example"
const response = await fetch('https://api.example.com/v1/users', {
  method: 'GET',
  headers: {
    'Authorization': 'Bearer YOUR_API_KEY',
    'Content-Type': 'application/json'
  }
});

const data = await response.json();
console.log(data);
```
"##,
};

pub static USERS: ContentDescriptor = ContentDescriptor {
    id: "users",
    title: "Users API",
    body: r##"# Users

Manage user accounts and retrieve user information.

### GET /users

Retrieve a list of users

| Query Parameter | Description |
|-----------------|-------------|
| `page` | Page number (default: 1) |
| `limit` | Items per page (default: 10, max: 100) |

**Example Request**

```bash
curl -X GET "https://api.example.com/v1/users?page=1&limit=10" \
  -H "Authorization: Bearer YOUR_API_KEY"
```

**Example Response**

```json
{
  "data": [
    {
      "id": "user_123",
      "name": "John Doe",
      "email": "john@example.com",
      "avatar": "https://example.com/avatar.jpg",
      "created_at": "2024-01-01T00:00:00Z",
      "updated_at": "2024-01-01T00:00:00Z"
    }
  ],
  "meta": {
    "total": 150,
    "page": 1,
    "per_page": 10,
    "total_pages": 15
  }
}
```

---

### GET /users/{id}

Retrieve a specific user by ID

| Path Parameter | Description |
|----------------|-------------|
| `id` | User ID (required) |

**Example Request**

```bash
curl -X GET "https://api.example.com/v1/users/user_123" \
  -H "Authorization: Bearer YOUR_API_KEY"
```

---

### POST /users

Create a new user

**Request Body**

```json
{
  "name": "Jane Doe",
  "email": "jane@example.com",
  "password": "securepassword123"
}
```

**Example Request**

```bash
curl -X POST "https://api.example.com/v1/users" \
  -H "Authorization: Bearer YOUR_API_KEY" \
  -H "Content-Type: application/json" \
  -d '{
    "name": "Jane Doe",
    "email": "jane@example.com",
    "password": "securepassword123"
  }'
```
"##,
};

pub static ERRORS: ContentDescriptor = ContentDescriptor {
    id: "errors",
    title: "Error Handling",
    body: r##"# Error Handling

Learn about the error codes and responses you might encounter.

## HTTP Status Codes

| Code | Meaning |
|------|---------|
| 200 | OK - Request succeeded |
| 201 | Created - Resource created successfully |
| 400 | Bad Request - Invalid request parameters |
| 401 | Unauthorized - Invalid or missing authentication |
| 404 | Not Found - Resource not found |
| 429 | Too Many Requests - Rate limit exceeded |
| 500 | Internal Server Error - Server error |

## Error Response Format

```json title="Error Response"
{
  "error": {
    "code": "VALIDATION_ERROR",
    "message": "The request contains invalid parameters",
    "details": [
      {
        "field": "email",
        "message": "Email address is required"
      }
    ]
  }
}
```
"##,
};

/// Registration order (the introduction is registered separately as the default)
pub static ALL: &[&ContentDescriptor] = &[&QUICKSTART, &AUTHENTICATION, &USERS, &ERRORS];
